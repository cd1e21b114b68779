//! JSON API over the back-office rules

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;
use crate::domain::access::{ensure_role, Role, StaffMember, WarehouseScope};
use crate::domain::aggregates::{ensure_assignable, select_assignable, Assignment, AssignmentStatus, OrderAssignments};
use crate::domain::cod::{reconcile_cod, summarize_cod, CodReconciliation, CodSummary};
use crate::domain::pricing::{adjust_declared_value, calculate_return_fee, shipping_breakdown, CommercialInvoice, InvoiceLine, ReturnFee, ShippingBreakdown};
use crate::domain::value_objects::AmountLike;
use crate::{AppConfig, BackofficeError};

#[derive(Clone)] pub struct AppState { pub config: AppConfig }

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "backoffice-rules", "time": Utc::now()})) }))
        .route("/api/v1/declared-value", post(declared_value))
        .route("/api/v1/commercial-invoice", post(commercial_invoice))
        .route("/api/v1/return-fee", post(return_fee))
        .route("/api/v1/shipping-total", post(shipping_total))
        .route("/api/v1/cod/reconcile", post(reconcile))
        .route("/api/v1/assignments/check", post(check_assignment))
        .route("/api/v1/assignments/auto", post(auto_assign))
        .route("/api/v1/assignments/complete", post(complete_assignment))
        .route("/api/v1/shipments/scoped", post(scoped_shipments))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

fn reject(e: BackofficeError) -> (StatusCode, String) {
    let status = match e {
        BackofficeError::AlreadyAssigned { .. } => StatusCode::CONFLICT,
        BackofficeError::NoActiveAssignment { .. } => StatusCode::NOT_FOUND,
        BackofficeError::Forbidden { .. } => StatusCode::FORBIDDEN,
        BackofficeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

#[derive(Debug, Deserialize)] pub struct DeclaredValueRequest { pub value: f64 }
#[derive(Debug, Serialize)] #[serde(rename_all = "camelCase")] pub struct DeclaredValueResponse { pub value: f64, pub declared_value: Decimal }

async fn declared_value(Json(r): Json<DeclaredValueRequest>) -> Json<DeclaredValueResponse> {
    Json(DeclaredValueResponse { value: r.value, declared_value: adjust_declared_value(r.value) })
}

#[derive(Debug, Deserialize)] pub struct InvoiceRequest { pub lines: Vec<InvoiceLine> }

async fn commercial_invoice(Json(r): Json<InvoiceRequest>) -> Json<CommercialInvoice> {
    Json(CommercialInvoice::from_lines(r.lines))
}

#[derive(Debug, Deserialize)] #[serde(rename_all = "camelCase")] pub struct ReturnFeeRequest { pub base_fee: Option<f64>, pub shipping_amount: Option<f64> }

async fn return_fee(State(s): State<AppState>, Json(r): Json<ReturnFeeRequest>) -> Json<ReturnFee> {
    Json(calculate_return_fee(r.base_fee.unwrap_or(s.config.return_base_fee), r.shipping_amount.unwrap_or(0.0)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    #[serde(default)] pub shipping_cost: AmountLike,
    #[serde(default)] pub shipping_tax: Option<AmountLike>,
}

async fn shipping_total(Json(r): Json<ShippingRequest>) -> Json<ShippingBreakdown> {
    Json(shipping_breakdown(&r.shipping_cost, r.shipping_tax.as_ref()))
}

#[derive(Debug, Deserialize)] pub struct CodItem { pub expected: f64, pub collected: f64 }
#[derive(Debug, Deserialize)] pub struct CodRequest { pub items: Vec<CodItem> }
#[derive(Debug, Serialize)] pub struct CodResponse { pub items: Vec<CodReconciliation>, pub summary: CodSummary }

async fn reconcile(Json(r): Json<CodRequest>) -> Json<CodResponse> {
    let items: Vec<CodReconciliation> = r.items.iter().map(|i| reconcile_cod(i.expected, i.collected)).collect();
    let summary = summarize_cod(&items);
    Json(CodResponse { items, summary })
}

#[derive(Debug, Deserialize)] #[serde(rename_all = "camelCase")] pub struct AssignmentCheckRequest { pub order_id: Uuid, #[serde(default)] pub statuses: Vec<AssignmentStatus> }

async fn check_assignment(Json(r): Json<AssignmentCheckRequest>) -> ApiResult<serde_json::Value> {
    ensure_assignable(r.order_id, &r.statuses).map_err(reject)?;
    Ok(Json(serde_json::json!({"orderId": r.order_id, "assignable": true})))
}

#[derive(Debug, Deserialize)] #[serde(rename_all = "camelCase")] pub struct OrderHistory { pub order_id: Uuid, #[serde(default)] pub assignments: Vec<Assignment> }
#[derive(Debug, Deserialize)] #[serde(rename_all = "camelCase")] pub struct AutoAssignRequest { pub staff_id: Uuid, pub candidates: Vec<OrderHistory> }
#[derive(Debug, Serialize)] #[serde(rename_all = "camelCase")] pub struct AssignedOrder { pub order_id: Uuid, pub assignment: Assignment }
#[derive(Debug, Serialize)] #[serde(rename_all = "camelCase")] pub struct AutoAssignResponse { pub assigned: Vec<AssignedOrder>, pub skipped: Vec<Uuid> }

async fn auto_assign(Json(r): Json<AutoAssignRequest>) -> ApiResult<AutoAssignResponse> {
    let orders: Vec<OrderAssignments> = r.candidates.into_iter().map(|c| OrderAssignments::with_assignments(c.order_id, c.assignments)).collect();
    let eligible = select_assignable(&orders);
    let (mut assigned, mut skipped) = (vec![], vec![]);
    for mut order in orders {
        if !eligible.contains(&order.order_id()) { skipped.push(order.order_id()); continue; }
        let assignment = order.assign(r.staff_id).map_err(reject)?.clone();
        assigned.push(AssignedOrder { order_id: order.order_id(), assignment });
    }
    tracing::info!(assigned = assigned.len(), skipped = skipped.len(), "auto-assignment run");
    Ok(Json(AutoAssignResponse { assigned, skipped }))
}

async fn complete_assignment(Json(r): Json<OrderHistory>) -> ApiResult<Vec<Assignment>> {
    let mut order = OrderAssignments::with_assignments(r.order_id, r.assignments);
    order.complete().map_err(reject)?;
    Ok(Json(order.assignments().to_vec()))
}

#[derive(Debug, Clone, Serialize, Deserialize)] #[serde(rename_all = "camelCase")] pub struct ShipmentRow { pub reference: String, pub warehouse_id: Option<Uuid> }
#[derive(Debug, Deserialize)] pub struct ScopedShipmentsRequest { pub member: StaffMember, pub shipments: Vec<ShipmentRow> }

async fn scoped_shipments(Json(r): Json<ScopedShipmentsRequest>) -> ApiResult<Vec<ShipmentRow>> {
    ensure_role(&r.member, &[Role::Admin, Role::Manager, Role::Warehouse]).map_err(reject)?;
    Ok(Json(WarehouseScope::for_member(&r.member).filter(r.shipments, |s| s.warehouse_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(return_base_fee: f64) -> Router { router(AppState { config: AppConfig { return_base_fee, ..AppConfig::default() } }) }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder().method("POST").uri(uri).header("content-type", "application/json").body(Body::from(body.to_string())).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app(0.0).oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_declared_value_endpoint() {
        let (status, body) = post_json(app(0.0), "/api/v1/declared-value", json!({"value": 100})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["declaredValue"], json!(30.0));
    }

    #[tokio::test]
    async fn test_return_fee_uses_configured_base() {
        let (_, body) = post_json(app(20.0), "/api/v1/return-fee", json!({"shippingAmount": 15})).await;
        assert_eq!(body, json!({"baseAmount": 20.0, "effectiveFee": 10.0}));
        let (_, body) = post_json(app(20.0), "/api/v1/return-fee", json!({"baseFee": 30})).await;
        assert_eq!(body["effectiveFee"], json!(30.0));
    }

    #[tokio::test]
    async fn test_shipping_total_endpoint() {
        let (_, body) = post_json(app(0.0), "/api/v1/shipping-total", json!({"shippingCost": {"amount": "50"}, "shippingTax": {"amount": 10}})).await;
        assert_eq!(body["total"], json!(60.0));
        assert_eq!(body["taxDerived"], json!(false));
        let (_, body) = post_json(app(0.0), "/api/v1/shipping-total", json!({"shippingCost": 100, "shippingTax": null})).await;
        assert_eq!(body["total"], json!(115.0));
        let (_, body) = post_json(app(0.0), "/api/v1/shipping-total", json!({})).await;
        assert_eq!(body["total"], json!(0.0));
    }

    #[tokio::test]
    async fn test_cod_reconcile_endpoint() {
        let (_, body) = post_json(app(0.0), "/api/v1/cod/reconcile", json!({"items": [{"expected": 100, "collected": 90}, {"expected": 50, "collected": 50}]})).await;
        assert_eq!(body["items"][0]["status"], json!("short"));
        assert_eq!(body["summary"]["matched"], json!(1));
        assert_eq!(body["summary"]["difference"], json!(-10.0));
    }

    #[tokio::test]
    async fn test_assignment_check_endpoint() {
        let order_id = Uuid::new_v4();
        let (status, _) = post_json(app(0.0), "/api/v1/assignments/check", json!({"orderId": order_id, "statuses": ["completed"]})).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = post_json(app(0.0), "/api/v1/assignments/check", json!({"orderId": order_id, "statuses": ["completed", "assigned"]})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.as_str().unwrap().contains("active assignment"));
    }

    #[tokio::test]
    async fn test_amounts_beyond_decimal_range() {
        let (status, body) = post_json(app(0.0), "/api/v1/shipping-total", json!({"shippingCost": 7.0e28})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(0.0));
        let (status, body) = post_json(app(0.0), "/api/v1/commercial-invoice", json!({"lines": [{"sku": "BULK", "quantity": u32::MAX, "unitValue": 1e25}]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["declaredTotal"], json!(0.0));
        let (status, body) = post_json(app(0.0), "/api/v1/cod/reconcile", json!({"items": [{"expected": 7.0e28, "collected": 7.0e28}, {"expected": 7.0e28, "collected": 7.0e28}]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["expectedTotal"], json!(0.0));
    }

    #[tokio::test]
    async fn test_auto_assign_skips_held_orders() {
        let (free, held, staff) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let held_by = json!({"id": Uuid::new_v4(), "staffId": Uuid::new_v4(), "status": "in_progress", "assignedAt": "2026-10-01T08:00:00Z"});
        let (status, body) = post_json(app(0.0), "/api/v1/assignments/auto", json!({"staffId": staff, "candidates": [{"orderId": free}, {"orderId": held, "assignments": [held_by]}]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned"][0]["orderId"], json!(free));
        assert_eq!(body["assigned"][0]["assignment"]["staffId"], json!(staff));
        assert_eq!(body["assigned"][0]["assignment"]["status"], json!("assigned"));
        assert_eq!(body["skipped"], json!([held]));
    }

    #[tokio::test]
    async fn test_complete_assignment_endpoint() {
        let order_id = Uuid::new_v4();
        let active = json!({"id": Uuid::new_v4(), "staffId": Uuid::new_v4(), "status": "assigned", "assignedAt": "2026-10-01T08:00:00Z"});
        let (status, body) = post_json(app(0.0), "/api/v1/assignments/complete", json!({"orderId": order_id, "assignments": [active]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["status"], json!("completed"));
        let (status, _) = post_json(app(0.0), "/api/v1/assignments/complete", json!({"orderId": order_id})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_scoped_shipments_endpoint() {
        let (riyadh, jeddah) = (Uuid::new_v4(), Uuid::new_v4());
        let shipments = json!([{"reference": "SHP-1", "warehouseId": riyadh}, {"reference": "SHP-2", "warehouseId": jeddah}, {"reference": "SHP-3", "warehouseId": null}]);
        let member = |role: &str| json!({"id": Uuid::new_v4(), "role": role, "warehouseIds": [riyadh]});
        let (status, body) = post_json(app(0.0), "/api/v1/shipments/scoped", json!({"member": member("warehouse"), "shipments": shipments})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"reference": "SHP-1", "warehouseId": riyadh}]));
        let (_, body) = post_json(app(0.0), "/api/v1/shipments/scoped", json!({"member": member("admin"), "shipments": shipments})).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        let (status, _) = post_json(app(0.0), "/api/v1/shipments/scoped", json!({"member": member("accountant"), "shipments": shipments})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_commercial_invoice_endpoint() {
        let (_, body) = post_json(app(0.0), "/api/v1/commercial-invoice", json!({"lines": [{"sku": "A1", "quantity": 3, "unitValue": 10}]})).await;
        assert_eq!(body["declaredTotal"], json!(9.0));
        assert_eq!(body["lines"][0]["declaredUnitValue"], json!(3.0));
    }
}
