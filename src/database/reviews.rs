use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::{CategoryScore, Review};

use super::connection::DbConn;
use super::models::{NewReview, UpsertOutcome};

const REVIEW_COLUMNS: &str = "id, source, source_id, review_type, status, rating, public_review, guest_name, listing_name, submitted_at, is_approved";

/// Insert the review or refresh its content if the (source, source_id) pair
/// is already known. The operator's is_approved flag is never overwritten.
pub fn upsert_review(conn: &mut DbConn, review: &NewReview) -> Result<UpsertOutcome> {
    let existing_id = find_id_by_source(conn, &review.source, &review.source_id)?;

    let outcome = match existing_id {
        Some(id) => {
            let sql = "UPDATE reviews SET review_type = ?1, status = ?2, rating = ?3, public_review = ?4, guest_name = ?5, listing_name = ?6, submitted_at = ?7 WHERE id = ?8";
            conn.execute(
                sql,
                params![
                    review.review_type,
                    review.status,
                    review.rating,
                    review.public_review,
                    review.guest_name,
                    review.listing_name,
                    review.submitted_at,
                    id
                ],
            )
            .context("Failed to update review")?;
            UpsertOutcome::Updated(id)
        }
        None => {
            let sql = "INSERT INTO reviews (source, source_id, review_type, status, rating, public_review, guest_name, listing_name, submitted_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
            conn.execute(
                sql,
                params![
                    review.source,
                    review.source_id,
                    review.review_type,
                    review.status,
                    review.rating,
                    review.public_review,
                    review.guest_name,
                    review.listing_name,
                    review.submitted_at
                ],
            )
            .context("Failed to insert review")?;
            UpsertOutcome::Inserted(conn.last_insert_rowid())
        }
    };

    replace_categories(conn, outcome.review_id(), &review.category_scores)?;
    Ok(outcome)
}

fn find_id_by_source(conn: &mut DbConn, source: &str, source_id: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM reviews WHERE source = ?1 AND source_id = ?2",
        params![source, source_id],
        |row| row.get(0),
    )
    .optional()
    .context("Failed to query review by (source, source_id)")
}

fn replace_categories(conn: &mut DbConn, review_id: i64, scores: &[CategoryScore]) -> Result<()> {
    conn.execute(
        "DELETE FROM review_categories WHERE review_id = ?1",
        params![review_id],
    )
    .context("Failed to clear review categories")?;

    for score in scores {
        conn.execute(
            "INSERT INTO review_categories (review_id, category, rating) VALUES (?1, ?2, ?3)",
            params![review_id, score.category, score.rating],
        )
        .context("Failed to insert review category")?;
    }

    Ok(())
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Review>> {
    let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY submitted_at DESC");
    let mut stmt = conn.prepare(&sql)?;
    let mut reviews = stmt
        .query_map([], parse_review_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    drop(stmt);

    attach_categories(conn, &mut reviews)?;
    Ok(reviews)
}

pub fn list_approved(conn: &mut DbConn) -> Result<Vec<Review>> {
    let sql =
        format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE is_approved = 1 ORDER BY submitted_at DESC");
    let mut stmt = conn.prepare(&sql)?;
    let mut reviews = stmt
        .query_map([], parse_review_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    drop(stmt);

    attach_categories(conn, &mut reviews)?;
    Ok(reviews)
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Review>> {
    let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1");
    let review = conn
        .query_row(&sql, params![id], parse_review_row)
        .optional()
        .context("Failed to query review by id")?;

    match review {
        Some(mut review) => {
            attach_categories(conn, std::slice::from_mut(&mut review))?;
            Ok(Some(review))
        }
        None => Ok(None),
    }
}

/// Flip the approval flag. Returns false when no such review exists.
pub fn set_approval(conn: &mut DbConn, id: i64, approved: bool) -> Result<bool> {
    let changed = conn
        .execute(
            "UPDATE reviews SET is_approved = ?1 WHERE id = ?2",
            params![approved, id],
        )
        .context("Failed to update approval flag")?;
    Ok(changed > 0)
}

fn parse_review_row(row: &rusqlite::Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        source: row.get(1)?,
        source_id: row.get(2)?,
        review_type: row.get(3)?,
        status: row.get(4)?,
        rating: row.get(5)?,
        public_review: row.get(6)?,
        guest_name: row.get(7)?,
        listing_name: row.get(8)?,
        submitted_at: row.get(9)?,
        is_approved: row.get(10)?,
        category_scores: Vec::new(),
    })
}

fn attach_categories(conn: &mut DbConn, reviews: &mut [Review]) -> Result<()> {
    if reviews.is_empty() {
        return Ok(());
    }

    let mut stmt =
        conn.prepare("SELECT review_id, category, rating FROM review_categories ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                CategoryScore {
                    category: row.get(1)?,
                    rating: row.get(2)?,
                },
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut by_review: HashMap<i64, Vec<CategoryScore>> = HashMap::new();
    for (review_id, score) in rows {
        by_review.entry(review_id).or_default().push(score);
    }

    for review in reviews.iter_mut() {
        if let Some(scores) = by_review.remove(&review.id) {
            review.category_scores = scores;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup;
    use chrono::{TimeZone, Utc};
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_conn() -> DbConn {
        let manager = SqliteConnectionManager::memory()
            .with_init(crate::database::connection::enable_foreign_keys);
        let pool = r2d2::Pool::builder().max_size(1).build(manager).unwrap();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();
        conn
    }

    fn new_review(source_id: &str) -> NewReview {
        NewReview {
            source: "hostaway".to_string(),
            source_id: source_id.to_string(),
            review_type: "guest-to-host".to_string(),
            status: "published".to_string(),
            rating: None,
            public_review: "Lovely stay".to_string(),
            guest_name: "Ada".to_string(),
            listing_name: "Flat 1 - X9".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            category_scores: vec![
                CategoryScore {
                    category: "cleanliness".to_string(),
                    rating: 9.0,
                },
                CategoryScore {
                    category: "communication".to_string(),
                    rating: 7.0,
                },
            ],
        }
    }

    #[test]
    fn upsert_dedupes_on_source_pair() {
        let mut conn = test_conn();

        let first = upsert_review(&mut conn, &new_review("7453")).unwrap();
        assert!(matches!(first, UpsertOutcome::Inserted(_)));

        let mut refreshed = new_review("7453");
        refreshed.public_review = "Updated text".to_string();
        let second = upsert_review(&mut conn, &refreshed).unwrap();
        assert_eq!(second.review_id(), first.review_id());
        assert!(matches!(second, UpsertOutcome::Updated(_)));

        let reviews = list_all(&mut conn).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].public_review, "Updated text");
        assert_eq!(reviews[0].category_scores.len(), 2);
    }

    #[test]
    fn resync_preserves_approval_flag() {
        let mut conn = test_conn();

        let outcome = upsert_review(&mut conn, &new_review("7453")).unwrap();
        assert!(set_approval(&mut conn, outcome.review_id(), true).unwrap());

        upsert_review(&mut conn, &new_review("7453")).unwrap();

        let review = find_by_id(&mut conn, outcome.review_id()).unwrap().unwrap();
        assert!(review.is_approved);
        assert_eq!(review.effective_rating(), Some(8.0));
    }

    #[test]
    fn deleting_review_cascades_categories() {
        let mut conn = test_conn();
        let outcome = upsert_review(&mut conn, &new_review("7453")).unwrap();

        conn.execute("DELETE FROM reviews WHERE id = ?1", params![outcome.review_id()])
            .unwrap();

        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM review_categories", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn approval_toggle_reports_missing_rows() {
        let mut conn = test_conn();
        assert!(!set_approval(&mut conn, 42, true).unwrap());

        upsert_review(&mut conn, &new_review("1")).unwrap();
        upsert_review(&mut conn, &new_review("2")).unwrap();
        let all = list_all(&mut conn).unwrap();
        let approved_id = all[0].id;
        assert!(set_approval(&mut conn, approved_id, true).unwrap());

        let approved = list_approved(&mut conn).unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, approved_id);
    }
}
