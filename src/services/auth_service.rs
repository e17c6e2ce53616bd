use crate::database::MongoDB;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // uid
    pub email: String,
    pub name: Option<String>,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

// User model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub uid: String,  // PRIMARY IDENTIFIER across collections
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: Option<String>,
    /// "user", "mentor" and/or "admin"
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
    pub last_login: Option<BsonDateTime>,
}

fn default_roles() -> Vec<String> {
    vec!["user".to_string()]
}

fn default_is_active() -> bool {
    true
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub roles: Vec<String>,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "incubator-service".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "incubator-api".to_string())
}

// Generate JWT token
pub fn generate_jwt(user: &User) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: user.uid.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        roles: user.roles.clone(),
        is_active: user.is_active,
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

// Generate refresh token (longer expiry)
pub fn generate_refresh_token(uid: &str) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(30)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: uid.to_string(),
        email: String::new(),
        name: None,
        roles: vec![],
        is_active: true,
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate refresh token: {}", e))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

// User login
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<User>("users");

    let filter = doc! {
        "email": &request.email,
    };

    let user = collection
        .find_one(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Invalid credentials".to_string())?;

    let stored_password = user
        .password
        .as_ref()
        .ok_or_else(|| "Invalid credentials".to_string())?;

    let valid = verify(&request.password, stored_password)
        .map_err(|e| format!("Password verification error: {}", e))?;

    if !valid {
        return Err("Invalid credentials".to_string());
    }

    if !user.is_active {
        return Err("Account is inactive".to_string());
    }

    let update = doc! {
        "$set": {
            "last_login": BsonDateTime::now(),
            "updated_at": BsonDateTime::now(),
        }
    };
    collection
        .update_one(doc! { "uid": &user.uid }, update)
        .await
        .map_err(|e| format!("Failed to update last_login: {}", e))?;

    let token = generate_jwt(&user)?;
    let refresh_token = generate_refresh_token(&user.uid)?;

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(refresh_token),
        user: UserInfo {
            id: user.uid,
            email: user.email,
            name: user.name,
            roles: user.roles,
        },
    })
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<User>("users");

    if request.email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if request.password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    // Check if user already exists
    let filter = doc! { "email": &request.email };
    if collection
        .find_one(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .is_some()
    {
        return Err("User already exists".to_string());
    }

    let hashed_password = hash(&request.password, DEFAULT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e))?;

    let new_uid = ObjectId::new().to_hex();

    let new_user = User {
        _id: None,
        uid: new_uid.clone(),
        email: request.email.clone(),
        password: Some(hashed_password),
        name: request.name.clone(),
        roles: vec!["user".to_string()],
        is_active: true,
        created_at: Some(BsonDateTime::now()),
        updated_at: Some(BsonDateTime::now()),
        last_login: Some(BsonDateTime::now()),
    };

    collection
        .insert_one(&new_user)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

    let token = generate_jwt(&new_user)?;
    let refresh_token = generate_refresh_token(&new_uid)?;

    log::info!("✅ User registered successfully: {}", request.email);

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(refresh_token),
        user: UserInfo {
            id: new_uid,
            email: new_user.email,
            name: new_user.name,
            roles: new_user.roles,
        },
    })
}

// Refresh token
pub async fn refresh_token(
    db: &MongoDB,
    request: &RefreshTokenRequest,
) -> Result<AuthResponse, String> {
    let claims = verify_token(&request.refresh_token)?;

    let collection = db.collection::<User>("users");

    let filter = doc! {
        "uid": &claims.sub,
    };

    let user = collection
        .find_one(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())?;

    if !user.is_active {
        return Err("Account is inactive".to_string());
    }

    let token = generate_jwt(&user)?;
    let new_refresh_token = generate_refresh_token(&user.uid)?;

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(new_refresh_token),
        user: UserInfo {
            id: user.uid,
            email: user.email,
            name: user.name,
            roles: user.roles,
        },
    })
}

/// Mints a fresh access token for a uid without requiring credentials.
/// Used by the session manager's keep-alive timers.
pub async fn force_token_refresh(db: &MongoDB, uid: &str) -> Result<String, String> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())?;

    if !user.is_active {
        return Err("Account is inactive".to_string());
    }

    generate_jwt(&user)
}

// Get current user
pub async fn get_current_user(db: &MongoDB, uid: &str) -> Result<UserInfo, String> {
    let collection = db.collection::<User>("users");

    let filter = doc! {
        "uid": uid,
    };

    let user = collection
        .find_one(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())?;

    Ok(UserInfo {
        id: user.uid,
        email: user.email,
        name: user.name,
        roles: user.roles,
    })
}

/// 🗑️ Delete a user record and all data hanging off it (admin action)
pub async fn delete_auth_user(db: &MongoDB, uid: &str) -> Result<(), String> {
    log::info!("🗑️ Deleting auth user: {}", uid);

    // 1. Delete user from users collection
    let users_collection = db.collection::<User>("users");
    let delete_user_result = users_collection
        .delete_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete user: {}", e))?;

    if delete_user_result.deleted_count == 0 {
        log::warn!("⚠️ User {} not found in database", uid);
        return Err(format!("User {} not found", uid));
    }

    log::info!("✅ User {} deleted from users collection", uid);

    // 2. Delete mentor requests opened by this user
    let requests_collection = db.collection::<mongodb::bson::Document>("mentor_requests");
    let delete_requests_result = requests_collection
        .delete_many(doc! { "user_id": uid })
        .await
        .map_err(|e| format!("Failed to delete mentor requests: {}", e))?;

    log::info!(
        "✅ Deleted {} mentor requests for user {}",
        delete_requests_result.deleted_count,
        uid
    );

    // 3. Delete notifications addressed to this user
    let notifications_collection = db.collection::<mongodb::bson::Document>("notifications");
    let delete_notifications_result = notifications_collection
        .delete_many(doc! { "user_id": uid })
        .await
        .map_err(|e| format!("Failed to delete notifications: {}", e))?;

    log::info!(
        "✅ Deleted {} notifications for user {}",
        delete_notifications_result.deleted_count,
        uid
    );

    log::info!("🎉 Account and all data successfully deleted for user {}", uid);
    Ok(())
}
