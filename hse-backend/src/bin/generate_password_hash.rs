// src/bin/generate_password_hash.rs
//
// Small utility for producing Argon2 hashes to seed accounts:
//   cargo run --bin generate-password-hash -- '<password>'

use hse_backend::utils::password::PasswordManager;

fn main() {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => {
            eprintln!("Usage: generate-password-hash <password>");
            std::process::exit(1);
        }
    };

    match PasswordManager::default().hash_password(&password) {
        Ok(hash) => println!("{}", hash),
        Err(e) => {
            eprintln!("Failed to hash password: {}", e);
            std::process::exit(1);
        }
    }
}
