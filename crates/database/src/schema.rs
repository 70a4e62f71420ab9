//! Schema setup and administrator seeding.
//!
//! Every statement is guarded with `IF NOT EXISTS`, so [`initialize`] can run
//! on every start. Statements run one at a time; a failure leaves earlier
//! ones applied.

use nile_client::{query, Executor};
use serde::Serialize;
use tracing::{error, info};

use crate::customer;
use crate::error::{DatabaseError, Result};

/// Table definitions, parents before children.
pub const TABLES: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255),
        password VARCHAR(255) NOT NULL,
        first_login BOOLEAN DEFAULT true,
        theme_color VARCHAR(50),
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        is_admin BOOLEAN DEFAULT false,
        company VARCHAR(255),
        logo_url TEXT,
        primary_color VARCHAR(50) DEFAULT '#ffde00',
        secondary_color VARCHAR(50) DEFAULT '#ff0000',
        CONSTRAINT unique_customer_email UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        customer_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        message TEXT NOT NULL,
        read BOOLEAN DEFAULT false,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS diagram_settings (
        id SERIAL PRIMARY KEY,
        customer_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        pv_analyse BOOLEAN DEFAULT true,
        ppa_cost_analysis BOOLEAN DEFAULT true,
        lastgang_dashboard BOOLEAN DEFAULT true,
        energy_heatmap BOOLEAN DEFAULT true,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT unique_customer_settings UNIQUE (customer_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        file_path TEXT NOT NULL,
        file_type VARCHAR(50) NOT NULL,
        file_size INTEGER NOT NULL,
        category VARCHAR(100),
        customer_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        is_public BOOLEAN DEFAULT false,
        download_count INTEGER DEFAULT 0,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        customer_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        status VARCHAR(50) DEFAULT 'active',
        start_date DATE,
        end_date DATE,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_data (
        id SERIAL PRIMARY KEY,
        project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,
        data_type VARCHAR(100) NOT NULL,
        data_value JSONB NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
    "#,
];

/// Secondary indexes for the common lookups.
pub const INDEXES: [&str; 8] = [
    "CREATE INDEX IF NOT EXISTS idx_messages_customer_id ON messages(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_messages_read ON messages(read)",
    "CREATE INDEX IF NOT EXISTS idx_documents_customer_id ON documents(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_documents_category ON documents(category)",
    "CREATE INDEX IF NOT EXISTS idx_projects_customer_id ON projects(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_projects_status ON projects(status)",
    "CREATE INDEX IF NOT EXISTS idx_project_data_project_id ON project_data(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_project_data_data_type ON project_data(data_type)",
];

/// Seed password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "050712";

/// Administrator account created on first initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// Default administrator with a custom password.
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::default()
        }
    }
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@example.com".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Outcome of a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub success: bool,
    pub message: String,
    /// Whether this run inserted the administrator.
    #[serde(skip)]
    pub admin_created: bool,
}

/// Create tables and indexes, then seed the administrator if missing.
pub async fn initialize(db: &dyn Executor, seed: &AdminSeed) -> Result<InitReport> {
    run_initialization(db, seed).await.map_err(|e| {
        error!("Error initializing database: {}", e);
        DatabaseError::Initialization(Box::new(e))
    })
}

async fn run_initialization(db: &dyn Executor, seed: &AdminSeed) -> Result<InitReport> {
    info!("Creating tables...");
    for statement in TABLES.iter().chain(INDEXES.iter()) {
        query(*statement).execute(db).await?;
    }

    let admin_created = seed_admin(db, seed).await?;
    info!(admin_created, "Database initialized");

    Ok(InitReport {
        success: true,
        message: "Database initialized successfully".to_string(),
        admin_created,
    })
}

/// Insert the administrator unless a customer already holds its password
/// or its email.
async fn seed_admin(db: &dyn Executor, seed: &AdminSeed) -> Result<bool> {
    if customer::get_customer_by_password(db, &seed.password).await?.is_some() {
        return Ok(false);
    }

    match customer::create_admin(db, &seed.name, &seed.email, &seed.password).await? {
        Some(admin) => {
            info!(id = admin.id, "Created administrator account");
            Ok(true)
        }
        None => {
            info!(email = %seed.email, "Administrator email already registered");
            Ok(false)
        }
    }
}
