//! Resource tables: public submissions, funding requests and escalations.
//!
//! Every reviewable table carries the same review columns and a status
//! check, so a decision is always one conditional update.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PUBLIC_SQL).await?;
        db.execute_unprepared(REQUESTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS extra_funds_requests CASCADE;
DROP TABLE IF EXISTS emergency_requests CASCADE;
DROP TABLE IF EXISTS fund_requests CASCADE;
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS services CASCADE;
DROP TABLE IF EXISTS tours CASCADE;
DROP TABLE IF EXISTS donations CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const PUBLIC_SQL: &str = r"
CREATE TABLE donations (
    id SERIAL PRIMARY KEY,
    donation_type VARCHAR(50) NOT NULL,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    park_name VARCHAR(255) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    message TEXT,
    is_anonymous BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_donations_email ON donations (lower(email));
CREATE INDEX idx_donations_created ON donations (created_at);

CREATE TABLE tours (
    id SERIAL PRIMARY KEY,
    park_name VARCHAR(255) NOT NULL,
    tour_name VARCHAR(255) NOT NULL,
    date DATE NOT NULL,
    time TIME NOT NULL,
    guests INTEGER NOT NULL CHECK (guests BETWEEN 1 AND 20),
    amount NUMERIC(12, 2) NOT NULL CHECK (amount = guests * 75),
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    special_requests TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_tours_email ON tours (lower(email));
CREATE INDEX idx_tours_created ON tours (created_at);

CREATE TABLE services (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    company_type VARCHAR(100) NOT NULL,
    provided_service VARCHAR(255),
    company_name VARCHAR(255) NOT NULL,
    tax_id VARCHAR(100) NOT NULL,
    company_registration VARCHAR(500) NOT NULL,
    application_letter VARCHAR(500),
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'denied')),
    reviewed_by INTEGER REFERENCES finance_officers(id) ON DELETE SET NULL,
    reviewed_date TIMESTAMPTZ,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_services_email ON services (lower(email));

CREATE TABLE payments (
    id SERIAL PRIMARY KEY,
    transaction_id VARCHAR(32) NOT NULL UNIQUE,
    payment_type VARCHAR(50) NOT NULL,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    card_name VARCHAR(255) NOT NULL,
    card_number_last4 CHAR(4) NOT NULL,
    expiry_date VARCHAR(10) NOT NULL,
    status VARCHAR(16) NOT NULL,
    park_name VARCHAR(255) NOT NULL,
    customer_email VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const REQUESTS_SQL: &str = r"
CREATE TABLE fund_requests (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    category VARCHAR(100) NOT NULL,
    park_name VARCHAR(255) NOT NULL,
    urgency VARCHAR(50) NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    created_by INTEGER NOT NULL REFERENCES parkstaff(id) ON DELETE CASCADE,
    reviewed_by INTEGER REFERENCES finance_officers(id) ON DELETE SET NULL,
    reviewed_date TIMESTAMPTZ,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_fund_requests_creator ON fund_requests (created_by, created_at DESC);

CREATE TRIGGER trg_fund_requests_updated_at
    BEFORE UPDATE ON fund_requests
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();

CREATE TABLE emergency_requests (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    park_name VARCHAR(255) NOT NULL,
    emergency_type VARCHAR(100) NOT NULL,
    justification TEXT NOT NULL,
    timeframe VARCHAR(100) NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    created_by INTEGER NOT NULL REFERENCES finance_officers(id) ON DELETE CASCADE,
    reviewed_by INTEGER REFERENCES government_officers(id) ON DELETE SET NULL,
    reviewed_date TIMESTAMPTZ,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE extra_funds_requests (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    park_name VARCHAR(255) NOT NULL,
    category VARCHAR(100) NOT NULL,
    justification TEXT NOT NULL,
    expected_duration VARCHAR(100) NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    created_by INTEGER NOT NULL REFERENCES finance_officers(id) ON DELETE CASCADE,
    reviewed_by INTEGER REFERENCES government_officers(id) ON DELETE SET NULL,
    reviewed_date TIMESTAMPTZ,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE budgets (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    fiscal_year VARCHAR(20) NOT NULL,
    park_name VARCHAR(255) NOT NULL,
    description TEXT,
    total_amount NUMERIC(14, 2) NOT NULL CHECK (total_amount > 0),
    items JSONB NOT NULL DEFAULT '[]'::jsonb,
    status VARCHAR(16) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    created_by INTEGER NOT NULL REFERENCES finance_officers(id) ON DELETE CASCADE,
    reviewed_by INTEGER REFERENCES government_officers(id) ON DELETE SET NULL,
    reviewed_date TIMESTAMPTZ,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
