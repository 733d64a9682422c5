use std::path::PathBuf;

use serde_json::json;

use crate::error::SuiteResult;
use crate::factories::{self, PetPatch};
use crate::models::{Pet, PetStatus};
use crate::scenario;
use crate::services::UploadImage;
use crate::testing::deviation::{
    INVALID_STATUS_FILTER, MALFORMED_PET_BODY, MISSING_PET_FOUND, READ_AFTER_WRITE, UPLOAD_ACCEPTS_ANY_FILE_TYPE,
    UPLOAD_TO_MISSING_PET,
};
use crate::testing::{Assertion, Cleanup, Scenario, ScenarioContext};

const GROUP: &str = "pet";

/// Far above anything the backend hands out.
pub const MISSING_PET_ID: i64 = 999_999_999;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        scenario!(GROUP, pet_crud_lifecycle),
        scenario!(GROUP, pet_read_after_write),
        scenario!(GROUP, get_missing_pet),
        scenario!(GROUP, find_pets_by_status),
        scenario!(GROUP, find_pets_by_invalid_status),
        scenario!(GROUP, update_pet_with_form),
        scenario!(GROUP, upload_image_placeholder),
        scenario!(GROUP, upload_image_missing_pet),
        scenario!(GROUP, upload_image_wrong_file_type),
        scenario!(GROUP, delete_pet_twice),
        scenario!(GROUP, create_pet_with_malformed_body),
    ]
}

/// Create a pet from `patch`, expect it echoed back, and schedule its deletion
/// once the backend has accepted it.
pub(crate) async fn create_pet(ctx: &mut ScenarioContext, patch: PetPatch) -> SuiteResult<(i64, Pet)> {
    let id = patch.id.unwrap_or_else(factories::unique_id);
    let pet = factories::pet::build(PetPatch { id: Some(id), ..patch });

    let response = ctx.pets().create(&pet).await?;
    ctx.defer_cleanup_if_created(&response, Cleanup::Pet(id));
    ctx.check("create pet", &response, &[
        Assertion::status(200),
        Assertion::json_eq("id", id),
        Assertion::json_eq("name", &pet.name),
    ])?;
    Ok((id, pet))
}

async fn pet_crud_lifecycle(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, pet) = create_pet(ctx, PetPatch::named("Buddy").status(PetStatus::Available)).await?;

    let updated = factories::pet::update(&pet, PetPatch::named("Max").status(PetStatus::Sold));
    let response = ctx.pets().update(&updated).await?;
    ctx.check("update pet", &response, &[
        Assertion::status(200),
        Assertion::json_eq("name", "Max"),
        Assertion::json_eq("status", PetStatus::Sold),
    ])?;

    let response = ctx.pets().delete(id).await?;
    ctx.check("delete pet", &response, &[Assertion::status(200)])?;

    let response = ctx.pets().get(id).await?;
    ctx.check_deviation("get deleted pet", &response, &MISSING_PET_FOUND)
}

async fn pet_read_after_write(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, pet) = create_pet(ctx, PetPatch::default()).await?;

    let response = ctx.pets().get(id).await?;
    ctx.check_deviation("get created pet", &response, &READ_AFTER_WRITE)?;
    if response.status != 200 {
        return Ok(());
    }

    let fetched: Pet = ctx.parse("parse created pet", &response)?;
    ctx.ensure(
        "compare created pet",
        &response,
        fetched.id == Some(id) && fetched.name == pet.name && fetched.photo_urls == pet.photo_urls,
        format!("created {pet:?}, read back {fetched:?}"),
    )
}

async fn get_missing_pet(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let response = ctx.pets().get(MISSING_PET_ID).await?;
    ctx.check_deviation("get missing pet", &response, &MISSING_PET_FOUND)
}

async fn find_pets_by_status(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    create_pet(ctx, PetPatch::default().status(PetStatus::Pending)).await?;

    let response = ctx.pets().find_by_status(&[PetStatus::Pending]).await?;
    ctx.check("find pending pets", &response, &[
        Assertion::status(200),
        Assertion::json_type("$", "array"),
    ])?;

    let response = ctx.pets().find_by_status(&[PetStatus::Available, PetStatus::Sold]).await?;
    ctx.check("find available or sold pets", &response, &[
        Assertion::status(200),
        Assertion::json_type("$", "array"),
    ])?;

    // Public data is loosely shaped, so only the status field is inspected.
    let pets: Vec<serde_json::Value> = ctx.parse("parse pets", &response)?;
    let stray = pets.iter().filter(|pet| pet["status"] == "pending").count();
    ctx.ensure(
        "filter excludes pending",
        &response,
        stray == 0,
        format!("{stray} pending pets listed for available,sold"),
    )
}

async fn find_pets_by_invalid_status(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let response = ctx.pets().find_by_status(&["not-a-status"]).await?;
    ctx.check_deviation("find by unknown status", &response, &INVALID_STATUS_FILTER)
}

async fn update_pet_with_form(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, _) = create_pet(ctx, PetPatch::default()).await?;

    let response = ctx
        .pets()
        .update_with_form(id, Some("Max"), Some(PetStatus::Sold.as_str()))
        .await?;
    ctx.check("update pet with form", &response, &[Assertion::status(200)])?;

    let response = ctx.pets().get(id).await?;
    ctx.check_deviation("get form-updated pet", &response, &READ_AFTER_WRITE)?;
    if response.status == 200 {
        ctx.check("form fields applied", &response, &[
            Assertion::json_eq("name", "Max"),
            Assertion::json_eq("status", PetStatus::Sold),
        ])?;
    }
    Ok(())
}

async fn upload_image_placeholder(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, _) = create_pet(ctx, PetPatch::default()).await?;

    // The path does not exist, so the placeholder bytes go out under its name.
    let upload = UploadImage {
        file: Some(PathBuf::from("fixtures/missing-photo.png")),
        additional_metadata: Some("scenario upload".to_string()),
    };
    let response = ctx.pets().upload_image(id, &upload).await?;
    ctx.check("upload image", &response, &[
        Assertion::status(200),
        Assertion::json_eq("code", 200),
        Assertion::json_contains("message", "missing-photo.png"),
    ])
}

async fn upload_image_missing_pet(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let response = ctx
        .pets()
        .upload_image(factories::unique_id(), &UploadImage::default())
        .await?;
    ctx.check_deviation("upload image to missing pet", &response, &UPLOAD_TO_MISSING_PET)
}

async fn upload_image_wrong_file_type(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, _) = create_pet(ctx, PetPatch::default()).await?;

    // Missing on disk, so placeholder bytes go out as `text/plain`.
    let upload = UploadImage {
        file: Some(PathBuf::from("fixtures/document.txt")),
        additional_metadata: None,
    };
    let response = ctx.pets().upload_image(id, &upload).await?;
    ctx.check_deviation("upload text file as image", &response, &UPLOAD_ACCEPTS_ANY_FILE_TYPE)
}

async fn delete_pet_twice(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, _) = create_pet(ctx, PetPatch::default()).await?;

    let response = ctx.pets().delete(id).await?;
    ctx.check("first delete", &response, &[Assertion::status(200)])?;

    let response = ctx.pets().delete(id).await?;
    ctx.check("second delete", &response, &[Assertion::status_in(&[200, 404])])
}

async fn create_pet_with_malformed_body(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let body = json!({
        "id": "not-a-number",
        "name": format!("malformed_{}", factories::unique_suffix()),
        "photoUrls": "not-an-array",
    });
    let response = ctx.pets().create(&body).await?;
    ctx.check_deviation("create malformed pet", &response, &MALFORMED_PET_BODY)
}
