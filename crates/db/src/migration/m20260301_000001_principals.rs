//! Principal tables, one per role.
//!
//! All six tables share one layout. Email uniqueness is enforced per table
//! on `lower(email)`; uniqueness across tables is checked by the
//! provisioning endpoints before insert.

use parkpro_shared::Role;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(TOUCH_UPDATED_AT_SQL).await?;
        for role in Role::ALL {
            db.execute_unprepared(&principal_table_sql(role.table_name()))
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for role in Role::ALL.iter().rev() {
            db.execute_unprepared(&format!(
                "DROP TABLE IF EXISTS {} CASCADE;",
                role.table_name()
            ))
            .await?;
        }
        db.execute_unprepared("DROP FUNCTION IF EXISTS touch_updated_at();")
            .await?;
        Ok(())
    }
}

const TOUCH_UPDATED_AT_SQL: &str = r"
CREATE OR REPLACE FUNCTION touch_updated_at() RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

fn principal_table_sql(table: &str) -> String {
    format!(
        r"
CREATE TABLE {table} (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    password_hash VARCHAR(255) NOT NULL,
    park_name VARCHAR(255),
    avatar_url VARCHAR(500),
    last_login TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX ux_{table}_email ON {table} (lower(email));

CREATE INDEX idx_{table}_last_login ON {table} (last_login DESC) WHERE last_login IS NOT NULL;

CREATE TRIGGER trg_{table}_updated_at
    BEFORE UPDATE ON {table}
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_tables_share_layout() {
        for role in Role::ALL {
            let sql = principal_table_sql(role.table_name());
            assert!(sql.contains(&format!("CREATE TABLE {} (", role.table_name())));
            assert!(sql.contains("password_hash VARCHAR(255) NOT NULL"));
            assert!(sql.contains("(lower(email))"));
        }
    }
}
