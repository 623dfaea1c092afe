use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::{
    auth::{jwt::generate_token, password::verify_password},
    config::Config,
    model::user::User,
    models::LoginReqDto,
    store::AppStore,
};

/// Swagger doc for the login endpoint
#[utoipa::path(
    post,
    path = "/login",
    request_body(
        content = LoginReqDto,
        description = "Login payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Authenticated", body = User),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, body),
    fields(username = %body.username)
)]
pub async fn login(
    body: web::Json<LoginReqDto>,
    store: web::Data<AppStore>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    // 1. Basic validation
    if body.username.trim().is_empty() || body.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().json(json!({
            "message": "Username and password are required"
        }));
    }

    // 2. Look up the user in the seeded store
    let stored = match store.find_user(&body.username) {
        Some(user) => {
            debug!(user_id = user.id, "User found");
            user
        }
        None => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().json(json!({
                "message": "Invalid credentials"
            }));
        }
    };

    // 3. Verify password
    if !verify_password(&body.password, &stored.password_hash) {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().json(json!({
            "message": "Invalid credentials"
        }));
    }

    // 4. Issue the token
    debug!("Generating access token");
    let token = generate_token(
        stored.id,
        stored.username.clone(),
        stored.role,
        &config.jwt_secret,
        config.token_ttl,
    );

    info!("Login successful");

    HttpResponse::Ok().json(User {
        id: stored.id,
        username: stored.username.clone(),
        role: stored.role,
        token,
    })
}
