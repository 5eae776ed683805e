#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::reference::{Ref, Summary};
    use crate::models::review::{
        DeliveryPartner, NewReview, Review, ReviewFilter, SubscriptionSummary, UserSummary,
    };
    use chrono::{DateTime, SecondsFormat, Utc};
    use leptos::logging::log;
    use rusqlite::{params, params_from_iter, Connection, Error, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;


    // Every review read goes through this projection so that all four
    // references are populated the same way.
    const REVIEW_SELECT: &str = "
        SELECT
            r.id, r.description, r.rating, r.image, r.date,
            dp.id, dp.name, dp.phone,
            s.id, s.title, s.price,
            u.id, u.name, u.email,
            f.id, f.name
        FROM reviews r
        LEFT JOIN delivery_partners dp ON dp.id = r.delivery_partner_id
        LEFT JOIN subscriptions s ON s.id = r.subscription_id
        LEFT JOIN users u ON u.id = r.user_id
        LEFT JOIN franchises f ON f.id = r.franchise_id";

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        let partner = match row.get::<_, Option<String>>(5)? {
            Some(id) => Some(Ref::Populated(DeliveryPartner {
                id,
                name: row.get(6)?,
                phone: row.get(7)?,
            })),
            None => None,
        };
        let subscription = match row.get::<_, Option<String>>(8)? {
            Some(id) => Some(Ref::Populated(SubscriptionSummary {
                id,
                title: row.get(9)?,
                price: row.get(10)?,
            })),
            None => None,
        };
        let user = match row.get::<_, Option<String>>(11)? {
            Some(id) => Some(Ref::Populated(UserSummary {
                id,
                name: row.get(12)?,
                email: row.get(13)?,
            })),
            None => None,
        };
        let franchise = match row.get::<_, Option<String>>(14)? {
            Some(id) => Some(Ref::Populated(Summary {
                id,
                name: row.get(15)?,
            })),
            None => None,
        };

        Ok(Review {
            id: row.get(0)?,
            description: row.get(1)?,
            rating: row.get(2)?,
            image: row.get(3)?,
            date: row.get(4)?,
            delivery_partner_id: partner,
            subscription_id: subscription,
            user_id: user,
            franchise_id: franchise,
        })
    }

    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            log!("[DB] Connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // Referenced collections. Rows may disappear independently of the
            // reviews pointing at them, so there are no foreign keys.
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS delivery_partners (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    phone TEXT
                );
                CREATE TABLE IF NOT EXISTS subscriptions (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    price REAL
                );
                CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT
                );
                CREATE TABLE IF NOT EXISTS franchises (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating reference tables: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    description TEXT NOT NULL CHECK (length(trim(description)) > 0),
                    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                    image TEXT,
                    delivery_partner_id TEXT NOT NULL,
                    subscription_id TEXT NOT NULL,
                    user_id TEXT NOT NULL,
                    franchise_id TEXT,
                    date TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS reviews_partner ON reviews (delivery_partner_id);
                CREATE INDEX IF NOT EXISTS reviews_subscription ON reviews (subscription_id);",
            )
            .map_err(|e| {
                log!("[DB] Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        pub async fn insert_delivery_partner(&self, partner: &DeliveryPartner) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT OR REPLACE INTO delivery_partners (id, name, phone) VALUES (?, ?, ?)",
                params![&partner.id, &partner.name, &partner.phone],
            )?;
            Ok(())
        }

        pub async fn insert_subscription(&self, subscription: &SubscriptionSummary) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT OR REPLACE INTO subscriptions (id, title, price) VALUES (?, ?, ?)",
                params![&subscription.id, &subscription.title, &subscription.price],
            )?;
            Ok(())
        }

        pub async fn insert_user(&self, user: &UserSummary) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT OR REPLACE INTO users (id, name, email) VALUES (?, ?, ?)",
                params![&user.id, &user.name, &user.email],
            )?;
            Ok(())
        }

        pub async fn insert_franchise(&self, franchise: &Summary) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT OR REPLACE INTO franchises (id, name) VALUES (?, ?)",
                params![&franchise.id, &franchise.name],
            )?;
            Ok(())
        }

        /// Fills the referenced collections with a few rows so reviews can be
        /// created against a fresh database.
        pub async fn seed_demo(&self) -> Result<(), Error> {
            self.insert_delivery_partner(&DeliveryPartner {
                id: "partner-1".into(),
                name: "Ravi Kumar".into(),
                phone: Some("9000000001".into()),
            })
            .await?;
            self.insert_subscription(&SubscriptionSummary {
                id: "subscription-1".into(),
                title: "Daily Milk".into(),
                price: Some(900.0),
            })
            .await?;
            self.insert_user(&UserSummary {
                id: "user-1".into(),
                name: "Asha".into(),
                email: Some("asha@example.com".into()),
            })
            .await?;
            self.insert_franchise(&Summary {
                id: "franchise-1".into(),
                name: "North Zone".into(),
            })
            .await?;
            log!("[DB] Demo reference data seeded");
            Ok(())
        }

        /// Stores a review dated `date` and reads it back populated.
        pub async fn insert_review(&self, review: &NewReview, date: DateTime<Utc>) -> Result<Review, Error> {
            let id = uuid::Uuid::new_v4().to_string();
            // fixed-width timestamps keep ORDER BY date a chronological sort
            let date = date.to_rfc3339_opts(SecondsFormat::Millis, true);
            log!("[DB] Inserting review {} for partner {}", id, review.delivery_partner_id);

            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews
                    (id, description, rating, image, delivery_partner_id,
                     subscription_id, user_id, franchise_id, date)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    &id,
                    &review.description,
                    review.rating,
                    &review.image,
                    &review.delivery_partner_id,
                    &review.subscription_id,
                    &review.user_id,
                    &review.franchise_id,
                    &date
                ],
            )
            .map_err(|e| {
                log!("[DB] Review insert failed: {:?}", e);
                e
            })?;

            let query = format!("{REVIEW_SELECT} WHERE r.id = ?");
            conn.query_row(&query, [&id], review_from_row)
        }

        /// Reviews matching every provided filter field, newest first.
        pub async fn get_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, Error> {
            let mut conditions = Vec::new();
            let mut values = Vec::new();
            if let Some(partner) = filter.delivery_partner() {
                conditions.push("r.delivery_partner_id = ?");
                values.push(partner);
            }
            if let Some(subscription) = filter.subscription() {
                conditions.push("r.subscription_id = ?");
                values.push(subscription);
            }

            let mut query = REVIEW_SELECT.to_string();
            if !conditions.is_empty() {
                query.push_str(" WHERE ");
                query.push_str(&conditions.join(" AND "));
            }
            query.push_str(" ORDER BY r.date DESC");

            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&query)?;
            let rows = stmt.query_map(params_from_iter(values), review_from_row)?;
            let reviews = rows.collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }

        /// Returns whether a review with `id` existed.
        pub async fn delete_review(&self, id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let removed = conn.execute("DELETE FROM reviews WHERE id = ?", [id])?;
            log!("[DB] Delete review {}: {} row(s)", id, removed);
            Ok(removed > 0)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
