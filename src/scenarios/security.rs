use crate::error::SuiteResult;
use crate::factories::{self, PetPatch};
use crate::probes::{self, SQL_INJECTION_PAYLOADS, XSS_PAYLOADS};
use crate::scenario;
use crate::testing::{Assertion, Cleanup, Scenario, ScenarioContext};

use super::pet::create_pet;

const GROUP: &str = "security";

pub fn scenarios() -> Vec<Scenario> {
    vec![
        scenario!(GROUP, xss_in_pet_name),
        scenario!(GROUP, sql_injection_in_username_lookup),
        scenario!(GROUP, sql_injection_in_login),
        scenario!(GROUP, oversized_pet_name),
    ]
}

/// Script payloads are stored and echoed verbatim, never rewritten.
async fn xss_in_pet_name(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    for payload in XSS_PAYLOADS {
        create_pet(ctx, PetPatch::named(payload)).await?;
    }
    Ok(())
}

async fn sql_injection_in_username_lookup(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    for payload in SQL_INJECTION_PAYLOADS {
        let response = ctx.users().get(payload).await?;
        ctx.check(&format!("get user {payload:?}"), &response, &[Assertion::status_in(&[400, 404])])?;
    }
    Ok(())
}

/// The backend accepts any credentials, so only a defined status is required.
async fn sql_injection_in_login(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    for payload in SQL_INJECTION_PAYLOADS {
        let response = ctx.users().login(payload, payload).await?;
        ctx.check(&format!("login as {payload:?}"), &response, &[Assertion::status_in(&[200, 400])])?;
    }
    Ok(())
}

async fn oversized_pet_name(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let id = factories::unique_id();
    let pet = factories::pet::build(PetPatch {
        id: Some(id),
        ..PetPatch::named(probes::oversized_name())
    });
    let response = ctx.pets().create(&pet).await?;
    ctx.defer_cleanup_if_created(&response, Cleanup::Pet(id));
    ctx.check("create pet with oversized name", &response, &[Assertion::status_in(&[200, 400, 413])])
}
