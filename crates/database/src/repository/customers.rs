use super::DbRepository;
use crate::error::DbError;
use core_types::Customer;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Debug, Clone)]
struct DbCustomer {
    id: Uuid,
    name: String,
    email: String,
    demographics: String,
}

impl From<DbCustomer> for Customer {
    fn from(row: DbCustomer) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            demographics: row.demographics,
        }
    }
}

impl DbRepository {
    /// Inserts a customer. A second customer with the same email is rejected
    /// by the unique constraint.
    pub async fn create_customer(&self, name: &str, email: &str, demographics: &str) -> Result<Uuid, DbError> {
        let customer_id = Uuid::new_v4();
        let mut tx = self.begin().await?;
        sqlx::query("INSERT INTO customers (id, name, email, demographics) VALUES ($1, $2, $3, $4)")
            .bind(customer_id)
            .bind(name)
            .bind(email)
            .bind(demographics)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(%customer_id, "Created customer.");
        Ok(customer_id)
    }

    pub async fn read_customers(&self) -> Result<Vec<Customer>, DbError> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query_as::<_, DbCustomer>(
            "SELECT id, name, email, demographics FROM customers ORDER BY name ASC, id ASC",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        name: &str,
        email: &str,
        demographics: &str,
    ) -> Result<(), DbError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query("UPDATE customers SET name = $1, email = $2, demographics = $3 WHERE id = $4")
            .bind(name)
            .bind(email)
            .bind(demographics)
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(DbError::NotFound { entity: "customer", id: customer_id });
        }
        tx.commit().await?;
        Ok(())
    }

    /// Deletes a customer and, through the cascade, its segment memberships.
    pub async fn delete_customer(&self, customer_id: Uuid) -> Result<u64, DbError> {
        let mut tx = self.begin().await?;
        let deleted = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        tracing::info!(%customer_id, deleted, "Deleted customer.");
        Ok(deleted)
    }
}
