use crate::error::SuiteResult;
use crate::factories::{self, UserPatch};
use crate::http::ApiResponse;
use crate::models::User;
use crate::scenario;
use crate::testing::deviation::{
    BULK_CREATE_NOT_PERSISTED, DELETE_MISSING_RETURNS_SUCCESS, LOGIN_ACCEPTS_ANY_PASSWORD, READ_AFTER_WRITE,
    UPDATE_MISSING_USER,
};
use crate::testing::{Assertion, Cleanup, Scenario, ScenarioContext};

const GROUP: &str = "user";

/// Prefix of the `message` field of a successful login.
pub const LOGIN_MESSAGE: &str = "logged in user session";

pub fn scenarios() -> Vec<Scenario> {
    vec![
        scenario!(GROUP, minimal_user_lifecycle),
        scenario!(GROUP, user_lifecycle),
        scenario!(GROUP, create_users_with_array),
        scenario!(GROUP, create_users_with_list),
        scenario!(GROUP, create_users_with_empty_list),
        scenario!(GROUP, update_missing_user),
        scenario!(GROUP, delete_missing_user),
        scenario!(GROUP, login_with_wrong_password),
    ]
}

/// Create `user`, expect an acknowledgement and schedule its deletion.
pub(crate) async fn create_user(ctx: &mut ScenarioContext, user: &User) -> SuiteResult<()> {
    let response = ctx.users().create(user).await?;
    ctx.defer_cleanup_if_created(&response, Cleanup::User(user.username.clone()));
    ctx.check("create user", &response, &[Assertion::status(200), Assertion::json_eq("code", 200)])
}

async fn minimal_user_lifecycle(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let user = factories::user::minimal();
    create_user(ctx, &user).await?;

    let response = ctx.users().delete(&user.username).await?;
    ctx.check("delete minimal user", &response, &[Assertion::status_in(&[200, 404])])
}

async fn user_lifecycle(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let user = factories::user::build(UserPatch::default());
    create_user(ctx, &user).await?;

    let response = ctx.users().get(&user.username).await?;
    ctx.check_deviation("get created user", &response, &READ_AFTER_WRITE)?;
    if response.status == 200 {
        ctx.check("compare created user", &response, &[
            Assertion::json_eq("username", &user.username),
            Assertion::json_eq("email", user.email.as_deref().unwrap_or_default()),
        ])?;
    }

    let password = user.password.as_deref().unwrap_or(factories::user::DEFAULT_PASSWORD);
    let response = ctx.users().login(&user.username, password).await?;
    ctx.check("login", &response, &[
        Assertion::status(200),
        Assertion::json_contains("message", LOGIN_MESSAGE),
    ])?;

    let renamed = factories::user::update(&user, UserPatch {
        first_name: Some("Updated".to_string()),
        ..UserPatch::default()
    });
    let response = ctx.users().update(&user.username, &renamed).await?;
    ctx.check("update user", &response, &[Assertion::status(200)])?;

    let response = ctx.users().logout().await?;
    ctx.check("logout", &response, &[Assertion::status(200)])?;

    let response = ctx.users().delete(&user.username).await?;
    ctx.check("delete user", &response, &[Assertion::status_in(&[200, 404])])
}

async fn create_users_with_array(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let users = factories::user::batch(2);
    let response = ctx.users().create_with_array(&users).await?;
    defer_bulk_cleanup(ctx, &response, &users);
    ctx.check("create users with array", &response, &[Assertion::status(200)])?;
    check_bulk_users_readable(ctx, &users).await
}

async fn create_users_with_list(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let users = factories::user::batch(2);
    let response = ctx.users().create_with_list(&users).await?;
    defer_bulk_cleanup(ctx, &response, &users);
    ctx.check("create users with list", &response, &[Assertion::status(200)])?;
    check_bulk_users_readable(ctx, &users).await
}

fn defer_bulk_cleanup(ctx: &mut ScenarioContext, response: &ApiResponse, users: &[User]) {
    for user in users {
        ctx.defer_cleanup_if_created(response, Cleanup::User(user.username.clone()));
    }
}

async fn check_bulk_users_readable(ctx: &mut ScenarioContext, users: &[User]) -> SuiteResult<()> {
    for user in users {
        let response = ctx.users().get(&user.username).await?;
        ctx.check_deviation(
            &format!("get bulk user {}", user.username),
            &response,
            &BULK_CREATE_NOT_PERSISTED,
        )?;
    }
    Ok(())
}

/// Either acceptance or rejection is fine; an unhandled error is not.
async fn create_users_with_empty_list(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let empty: Vec<User> = Vec::new();
    let response = ctx.users().create_with_array(&empty).await?;
    ctx.check("create users with empty array", &response, &[Assertion::status_in(&[200, 400])])?;

    let response = ctx.users().create_with_list(&empty).await?;
    ctx.check("create users with empty list", &response, &[Assertion::status_in(&[200, 400])])
}

async fn update_missing_user(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let user = factories::user::build(UserPatch::default());
    let response = ctx.users().update(&user.username, &user).await?;
    // The backend may create the user instead of answering 404.
    ctx.defer_cleanup_if_created(&response, Cleanup::User(user.username.clone()));
    ctx.check_deviation("update missing user", &response, &UPDATE_MISSING_USER)
}

async fn delete_missing_user(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let username = format!("missing_{}", factories::unique_suffix());
    let response = ctx.users().delete(&username).await?;
    ctx.check_deviation("delete missing user", &response, &DELETE_MISSING_RETURNS_SUCCESS)
}

async fn login_with_wrong_password(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let user = factories::user::build(UserPatch::default());
    create_user(ctx, &user).await?;

    let response = ctx.users().login(&user.username, "definitely-not-the-password").await?;
    ctx.check_deviation("login with wrong password", &response, &LOGIN_ACCEPTS_ANY_PASSWORD)
}
