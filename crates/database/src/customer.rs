//! Customer CRUD operations.

use nile_client::{query, Executor};

use crate::models::Customer;
use crate::patch::SetClause;
use crate::validation::{
    validate_color, validate_email, validate_length, validate_required, MAX_SHORT_LENGTH,
    MAX_TEXT_LENGTH,
};
use crate::Result;

/// Fields to change on a customer.
///
/// `None` leaves a column untouched. For nullable columns, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub password: Option<String>,
    pub theme_color: Option<Option<String>>,
    pub is_admin: Option<bool>,
    pub company: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub primary_color: Option<Option<String>>,
    pub secondary_color: Option<Option<String>>,
}

impl CustomerPatch {
    /// Check every present field against its column rules.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_required("name", name, MAX_TEXT_LENGTH)?;
        }
        if let Some(Some(email)) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_required("password", password, MAX_TEXT_LENGTH)?;
        }
        if let Some(Some(company)) = &self.company {
            validate_length("company", company, MAX_TEXT_LENGTH)?;
        }
        if let Some(Some(theme)) = &self.theme_color {
            validate_length("theme_color", theme, MAX_SHORT_LENGTH)?;
        }
        for color in [&self.primary_color, &self.secondary_color].into_iter().flatten().flatten() {
            validate_color(color)?;
        }
        Ok(())
    }

    fn set_clause(&self) -> SetClause {
        let mut clause = SetClause::new(1);
        clause.set_some("name", self.name.as_ref());
        clause.set_some("email", self.email.as_ref());
        clause.set_some("password", self.password.as_ref());
        clause.set_some("theme_color", self.theme_color.as_ref());
        clause.set_some("is_admin", self.is_admin);
        clause.set_some("company", self.company.as_ref());
        clause.set_some("logo_url", self.logo_url.as_ref());
        clause.set_some("primary_color", self.primary_color.as_ref());
        clause.set_some("secondary_color", self.secondary_color.as_ref());
        clause
    }
}

/// List all customers ordered by name.
pub async fn list_customers(db: &dyn Executor) -> Result<Vec<Customer>> {
    let customers = query("SELECT * FROM customers ORDER BY name")
        .fetch_all(db)
        .await?;

    Ok(customers)
}

/// Get a customer by ID.
pub async fn get_customer(db: &dyn Executor, id: i64) -> Result<Option<Customer>> {
    let customer = query("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(customer)
}

/// Get the customer holding a given password.
///
/// Portal logins are password-only, so the password doubles as the lookup key.
pub async fn get_customer_by_password(
    db: &dyn Executor,
    password: &str,
) -> Result<Option<Customer>> {
    let customer = query("SELECT * FROM customers WHERE password = $1")
        .bind(password)
        .fetch_optional(db)
        .await?;

    Ok(customer)
}

/// Get a customer by email.
pub async fn get_customer_by_email(db: &dyn Executor, email: &str) -> Result<Option<Customer>> {
    let customer = query("SELECT * FROM customers WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(db)
        .await?;

    Ok(customer)
}

/// Create a new customer who must change their password on first login.
pub async fn create_customer(
    db: &dyn Executor,
    name: &str,
    email: Option<&str>,
    password: &str,
) -> Result<Customer> {
    validate_new_customer(name, email, password)?;

    let customer = query(
        r#"
        INSERT INTO customers (name, email, password, first_login, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email.map(str::trim))
    .bind(password)
    .bind(true)
    .bind(false)
    .fetch_one(db)
    .await?;

    Ok(customer)
}

/// Create a customer with administrator rights.
///
/// Returns `None` when another customer already holds the email.
pub async fn create_admin(
    db: &dyn Executor,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Option<Customer>> {
    validate_new_customer(name, Some(email), password)?;

    let customer = query(
        r#"
        INSERT INTO customers (name, email, password, first_login, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT ON CONSTRAINT unique_customer_email DO NOTHING
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email.trim())
    .bind(password)
    .bind(true)
    .bind(true)
    .fetch_optional(db)
    .await?;

    Ok(customer)
}

fn validate_new_customer(name: &str, email: Option<&str>, password: &str) -> Result<()> {
    validate_required("name", name, MAX_TEXT_LENGTH)?;
    validate_required("password", password, MAX_TEXT_LENGTH)?;
    if let Some(email) = email {
        validate_email(email)?;
    }
    Ok(())
}

/// Apply a partial update, always refreshing `updated_at`.
///
/// Returns `None` when no customer has the given ID.
pub async fn update_customer(
    db: &dyn Executor,
    id: i64,
    patch: &CustomerPatch,
) -> Result<Option<Customer>> {
    patch.validate()?;

    let clause = patch.set_clause();
    let sql = format!(
        "UPDATE customers SET {} WHERE id = $1 RETURNING *",
        clause.assignments()
    );

    let customer = clause
        .bind_to(query(sql).bind(id))
        .fetch_optional(db)
        .await?;

    Ok(customer)
}

/// Set a new password and clear the first-login flag.
pub async fn change_password(
    db: &dyn Executor,
    id: i64,
    new_password: &str,
) -> Result<Option<Customer>> {
    validate_required("password", new_password, MAX_TEXT_LENGTH)?;

    let customer = query(
        r#"
        UPDATE customers
        SET password = $2, first_login = false, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(new_password)
    .fetch_optional(db)
    .await?;

    Ok(customer)
}

/// Delete a customer and, by cascade, everything they own.
///
/// Returns true if a customer was deleted, false if none existed.
pub async fn delete_customer(db: &dyn Executor, id: i64) -> Result<bool> {
    let result = query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.row_count > 0)
}
