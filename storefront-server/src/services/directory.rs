//! User directory
//!
//! Registration and credential lookup over the store. Passwords are
//! argon2-hashed at rest; authentication failures are reported with a
//! single uniform message so the API never reveals whether the email
//! or the password was wrong.

use shared::models::{Role, User};
use shared::util::{now_millis, user_id};

use crate::store::Store;
use crate::utils::{AppError, AppResult};

/// Demo accounts seeded into an empty directory
struct SeedUser {
    id: &'static str,
    email: &'static str,
    password: &'static str,
    name: &'static str,
    phone: &'static str,
    role: Role,
    vehicle_number: Option<&'static str>,
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        id: "user-1",
        email: "demo@foodify.com",
        password: "demo123",
        name: "Demo User",
        phone: "9876543210",
        role: Role::Customer,
        vehicle_number: None,
    },
    SeedUser {
        id: "admin-1",
        email: "admin@foodify.com",
        password: "admin123",
        name: "Admin User",
        phone: "9999999999",
        role: Role::Admin,
        vehicle_number: None,
    },
    SeedUser {
        id: "partner-1",
        email: "partner@foodify.com",
        password: "partner123",
        name: "Rajesh Kumar",
        phone: "9876543210",
        role: Role::DeliveryPartner,
        vehicle_number: Some("MH-01-AB-1234"),
    },
    SeedUser {
        id: "partner-2",
        email: "amit@foodify.com",
        password: "partner123",
        name: "Amit Singh",
        phone: "9765432109",
        role: Role::DeliveryPartner,
        vehicle_number: Some("DL-03-CD-5678"),
    },
    SeedUser {
        id: "partner-3",
        email: "priya@foodify.com",
        password: "partner123",
        name: "Priya Sharma",
        phone: "9654321098",
        role: Role::DeliveryPartner,
        vehicle_number: Some("KA-05-EF-9012"),
    },
    SeedUser {
        id: "partner-4",
        email: "vijay@foodify.com",
        password: "partner123",
        name: "Vijay Patel",
        phone: "9543210987",
        role: Role::DeliveryPartner,
        vehicle_number: Some("GJ-07-GH-3456"),
    },
    SeedUser {
        id: "partner-5",
        email: "deepa@foodify.com",
        password: "partner123",
        name: "Deepa Reddy",
        phone: "9432109876",
        role: Role::DeliveryPartner,
        vehicle_number: Some("TS-09-IJ-7890"),
    },
];

/// User directory service
#[derive(Clone, Debug)]
pub struct UserDirectory {
    store: Store,
}

impl UserDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Hash a password with argon2 (random salt, default params)
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Verify a password against a stored argon2 hash
    pub fn verify_password(
        hash: &str,
        password: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Register a new customer account.
    ///
    /// Role is always `customer`; admin and delivery-partner accounts
    /// exist only through seeding. Fails with Conflict when the email
    /// is taken.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: &str,
    ) -> AppResult<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters",
            ));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if phone.trim().len() < 10 {
            return Err(AppError::validation("A valid phone number is required"));
        }

        let user = User {
            id: user_id(),
            email: email.clone(),
            password_hash: Self::hash_password(password)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?,
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            role: Role::Customer,
            vehicle_number: None,
            created_at: now_millis(),
        };

        if !self.store.insert_user(&user)? {
            return Err(AppError::conflict("User already exists"));
        }

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Credential lookup: email + password, uniform failure
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        const BAD_CREDENTIALS: &str = "Invalid email or password";

        let email = email.trim().to_lowercase();
        let user = self
            .store
            .get_user_by_email(&email)?
            .ok_or_else(|| AppError::validation(BAD_CREDENTIALS))?;

        let valid = Self::verify_password(&user.password_hash, password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::validation(BAD_CREDENTIALS));
        }

        Ok(user)
    }

    /// Password recovery: the registered phone number is the recovery
    /// factor. Same uniform failure message for unknown email and
    /// mismatched phone.
    pub fn reset_password(&self, email: &str, phone: &str, new_password: &str) -> AppResult<()> {
        const BAD_RECOVERY: &str = "Email and phone number do not match our records";

        if new_password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters",
            ));
        }

        let email = email.trim().to_lowercase();
        let mut user = self
            .store
            .get_user_by_email(&email)?
            .ok_or_else(|| AppError::validation(BAD_RECOVERY))?;

        if user.phone != phone.trim() {
            return Err(AppError::validation(BAD_RECOVERY));
        }

        user.password_hash = Self::hash_password(new_password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
        self.store.update_user(&user)?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(self.store.get_user(user_id)?)
    }

    pub fn count(&self) -> AppResult<u64> {
        Ok(self.store.count_users()?)
    }

    /// Seed the demo accounts into an empty directory. Idempotent:
    /// does nothing when any user already exists.
    pub fn seed_demo_users(&self) -> AppResult<usize> {
        if self.store.count_users()? > 0 {
            return Ok(0);
        }

        let mut seeded = 0;
        for seed in SEED_USERS {
            let user = User {
                id: seed.id.to_string(),
                email: seed.email.to_string(),
                password_hash: Self::hash_password(seed.password)
                    .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?,
                name: seed.name.to_string(),
                phone: seed.phone.to_string(),
                role: seed.role,
                vehicle_number: seed.vehicle_number.map(str::to_string),
                created_at: now_millis(),
            };
            if self.store.insert_user(&user)? {
                seeded += 1;
            }
        }

        tracing::info!(count = seeded, "Seeded demo users");
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new(Store::open_in_memory().unwrap())
    }

    #[test]
    fn register_then_authenticate_roundtrip() {
        let dir = directory();
        let user = dir
            .register("Ravi@Example.com", "secret1", "Ravi", "9123456780")
            .unwrap();
        assert_eq!(user.role, Role::Customer);
        // Email is normalized and the hash is never the raw password
        assert_eq!(user.email, "ravi@example.com");
        assert_ne!(user.password_hash, "secret1");

        let back = dir.authenticate("ravi@example.com", "secret1").unwrap();
        assert_eq!(back.id, user.id);

        let err = dir.authenticate("ravi@example.com", "wrong").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn duplicate_registration_conflicts() {
        let dir = directory();
        dir.register("a@b.com", "secret1", "A", "9123456780").unwrap();
        let err = dir
            .register("a@b.com", "secret2", "B", "9123456781")
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn reset_password_requires_matching_phone() {
        let dir = directory();
        dir.register("a@b.com", "secret1", "A", "9123456780").unwrap();

        let err = dir
            .reset_password("a@b.com", "0000000000", "newpass1")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        dir.reset_password("a@b.com", "9123456780", "newpass1").unwrap();
        dir.authenticate("a@b.com", "newpass1").unwrap();
    }

    #[test]
    fn seeding_is_idempotent() {
        let dir = directory();
        assert_eq!(dir.seed_demo_users().unwrap(), 7);
        assert_eq!(dir.seed_demo_users().unwrap(), 0);

        let admin = dir.authenticate("admin@foodify.com", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);
        let partner = dir
            .authenticate("partner@foodify.com", "partner123")
            .unwrap();
        assert_eq!(partner.role, Role::DeliveryPartner);
        assert!(partner.vehicle_number.is_some());
    }
}
