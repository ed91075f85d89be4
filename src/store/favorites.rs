//! Saved places, owned by a user.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use super::{Database, StoreError, StoreResult};
use crate::models::FavoriteCreate;

/// A saved place as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Favorite {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub place_id: String,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

const FAVORITE_COLUMNS: &str = "id, user_id, place_id, name, city, country, lat, lon";

impl Favorite {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            place_id: row.get(2)?,
            name: row.get(3)?,
            city: row.get(4)?,
            country: row.get(5)?,
            lat: row.get(6)?,
            lon: row.get(7)?,
        })
    }
}

impl Database {
    /// Saves a favorite for `user_id`.
    ///
    /// Fails with [`StoreError::Duplicate`] if the user already saved `place_id`.
    pub fn create_favorite(&self, user_id: i64, fav: &FavoriteCreate) -> StoreResult<Favorite> {
        let conn = self.conn.lock();

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = ?1 AND place_id = ?2)",
            params![user_id, fav.place_id],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StoreError::Duplicate);
        }

        conn.execute(
            "INSERT INTO favorites (user_id, place_id, name, city, country, lat, lon, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                fav.place_id,
                fav.name,
                fav.city,
                fav.country,
                fav.lat,
                fav.lon,
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(StoreError::from_write)?;

        Ok(Favorite {
            id: conn.last_insert_rowid(),
            user_id,
            place_id: fav.place_id.clone(),
            name: fav.name.clone(),
            city: fav.city.clone(),
            country: fav.country.clone(),
            lat: fav.lat,
            lon: fav.lon,
        })
    }

    /// All favorites of `user_id`, oldest first.
    pub fn list_favorites(&self, user_id: i64) -> StoreResult<Vec<Favorite>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM favorites WHERE user_id = ?1 ORDER BY id",
            FAVORITE_COLUMNS
        ))?;
        let favorites = stmt
            .query_map(params![user_id], Favorite::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(favorites)
    }

    pub fn find_favorite(&self, id: i64) -> StoreResult<Option<Favorite>> {
        let conn = self.conn.lock();
        let favorite = conn
            .query_row(
                &format!("SELECT {} FROM favorites WHERE id = ?1", FAVORITE_COLUMNS),
                params![id],
                Favorite::from_row,
            )
            .optional()?;
        Ok(favorite)
    }

    /// Deletes a favorite by id. Returns whether a row was removed.
    pub fn delete_favorite(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
