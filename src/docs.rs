use crate::api::requests::{CreateRequest, StatusPatch};
use crate::model::certification_request::{CertificationRequest, Status};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::LoginReqDto;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Certification Request API",
        version = "1.0.0",
        description = r#"
## Certification Request Service

Employees submit certification requests (description, estimated budget,
expected date); supervisors review and approve or reject them.

### Endpoints
- **POST /login** — credential check, returns the user with a bearer token
- **GET /requests** — full request list
- **POST /requests** — submit a new request (id assigned server-side)
- **PATCH /requests/{id}** — change a request's status

State is held in process memory and reset on restart.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::api::requests::list_requests,
        crate::api::requests::create_request,
        crate::api::requests::update_status,
    ),
    components(
        schemas(
            LoginReqDto,
            User,
            Role,
            CertificationRequest,
            Status,
            CreateRequest,
            StatusPatch
        )
    ),
    tags(
        (name = "Auth", description = "Login"),
        (name = "Requests", description = "Certification request APIs"),
    )
)]
pub struct ApiDoc;
