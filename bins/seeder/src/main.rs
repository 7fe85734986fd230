//! Database seeder for Park Pro development and testing.
//!
//! Seeds one principal per role, each with the password `Secret123`, so
//! every dashboard can be logged into locally.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use parkpro_core::auth::hash_password;
use parkpro_core::intake::NewPrincipal;
use parkpro_db::PrincipalRepository;
use parkpro_shared::Role;

/// Password given to every seeded principal.
const SEED_PASSWORD: &str = "Secret123";

/// Park the seeded park staff belong to.
const SEED_PARK: &str = "Akagera National Park";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = parkpro_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding principals...");
    seed_principals(Arc::new(db)).await;

    println!("Seeding complete!");
}

fn seed_email(role: Role) -> String {
    format!("{}@parkpro.dev", role.as_str().replace('-', ""))
}

/// Seeds one principal per role, skipping any whose email is taken.
async fn seed_principals(db: Arc<DatabaseConnection>) {
    let repo = PrincipalRepository::new(db);

    for role in Role::ALL {
        let email = seed_email(role);

        match repo.email_in_use(&email, None).await {
            Ok(true) => {
                println!("  {email} already exists, skipping...");
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("Failed to check {email}: {e}");
                continue;
            }
        }

        let principal = NewPrincipal {
            first_name: "Test".to_string(),
            last_name: role.as_str().replace('-', " "),
            email: email.clone(),
            phone: None,
            park_name: (role == Role::ParkStaff).then(|| SEED_PARK.to_string()),
            credential: hash_password(SEED_PASSWORD),
        };

        match repo.create(role, &principal).await {
            Ok(key) => println!("  Created {role} {email} (id {})", key.id),
            Err(e) => eprintln!("Failed to insert {role} {email}: {e}"),
        }
    }
}
