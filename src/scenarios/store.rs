use crate::error::SuiteResult;
use crate::factories::{self, OrderPatch};
use crate::http::ApiResponse;
use crate::models::{Order, OrderStatus};
use crate::scenario;
use crate::testing::deviation::READ_AFTER_WRITE;
use crate::testing::{Assertion, Cleanup, Scenario, ScenarioContext};

const GROUP: &str = "store";

pub fn scenarios() -> Vec<Scenario> {
    vec![
        scenario!(GROUP, place_order),
        scenario!(GROUP, inventory_within_budget),
        scenario!(GROUP, order_with_negative_quantity),
        scenario!(GROUP, order_status_independent_of_complete),
        scenario!(GROUP, get_missing_order),
    ]
}

/// Build an order with a known id, place it, and schedule its deletion once the
/// backend has accepted it.
async fn place(ctx: &mut ScenarioContext, patch: OrderPatch) -> SuiteResult<(i64, ApiResponse)> {
    let id = patch.id.unwrap_or_else(factories::unique_id);
    let order = factories::order::build(OrderPatch { id: Some(id), ..patch });
    let response = ctx.store().place_order(&order).await?;
    ctx.defer_cleanup_if_created(&response, Cleanup::Order(id));
    Ok((id, response))
}

async fn place_order(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (id, response) = place(ctx, OrderPatch {
        pet_id: Some(123),
        quantity: Some(2),
        status: Some(OrderStatus::Placed),
        complete: Some(false),
        ..OrderPatch::default()
    })
    .await?;
    ctx.check("place order", &response, &[
        Assertion::status(200),
        Assertion::json_eq("id", id),
        Assertion::json_eq("petId", 123),
        Assertion::json_eq("quantity", 2),
        Assertion::json_eq("status", OrderStatus::Placed),
        Assertion::json_eq("complete", false),
    ])?;
    let placed: Order = ctx.parse("parse order", &response)?;

    let response = ctx.store().get_order(id).await?;
    ctx.check_deviation("get placed order", &response, &READ_AFTER_WRITE)?;
    if response.status == 200 {
        let fetched: Order = ctx.parse("parse fetched order", &response)?;
        ctx.ensure(
            "compare placed order",
            &response,
            fetched.pet_id == placed.pet_id && fetched.quantity == placed.quantity,
            format!("placed {placed:?}, read back {fetched:?}"),
        )?;
    }

    let response = ctx.store().delete_order(id).await?;
    ctx.check("delete order", &response, &[Assertion::status_in(&[200, 404])])
}

async fn inventory_within_budget(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let budget = ctx.response_budget_ms();
    let response = ctx.store().inventory().await?;
    ctx.check("get inventory", &response, &[
        Assertion::status(200),
        Assertion::json_type("$", "object"),
        Assertion::response_time_below(budget),
    ])
}

/// The API sets no lower bound on quantity; either acceptance or a 400 is a
/// defined answer.
async fn order_with_negative_quantity(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (_, response) = place(ctx, OrderPatch {
        quantity: Some(-1),
        ..OrderPatch::default()
    })
    .await?;
    ctx.check("place order with negative quantity", &response, &[Assertion::status_in(&[200, 400])])?;
    if response.status == 200 {
        ctx.check("quantity stored as sent", &response, &[Assertion::json_eq("quantity", -1)])?;
    }
    Ok(())
}

async fn order_status_independent_of_complete(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let (_, response) = place(ctx, OrderPatch {
        status: Some(OrderStatus::Delivered),
        complete: Some(false),
        ..OrderPatch::default()
    })
    .await?;
    ctx.check("delivered but incomplete", &response, &[
        Assertion::status(200),
        Assertion::json_eq("status", OrderStatus::Delivered),
        Assertion::json_eq("complete", false),
    ])?;

    let (_, response) = place(ctx, OrderPatch {
        status: Some(OrderStatus::Placed),
        complete: Some(true),
        ..OrderPatch::default()
    })
    .await?;
    ctx.check("placed but complete", &response, &[
        Assertion::status(200),
        Assertion::json_eq("status", OrderStatus::Placed),
        Assertion::json_eq("complete", true),
    ])
}

async fn get_missing_order(ctx: &mut ScenarioContext) -> SuiteResult<()> {
    let response = ctx.store().get_order(factories::unique_id()).await?;
    ctx.check("get missing order", &response, &[Assertion::status(404)])
}
