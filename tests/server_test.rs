use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use company_insights::dashboard::DashboardState;
use company_insights::pipeline::{CompanyPipeline, PipelineOptions};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Result<axum::Router> {
    let table = CompanyPipeline::new(PipelineOptions {
        reference_year: Some(2025),
    })
    .normalize_value(&json!([
        {"Company": "A", "Sector": "Finance", "Revenue": 5_000_000.0, "Employees": 10, "Country": "Chile", "Founding Year": 1990},
        {"Company": "B", "Sector": "Technology", "Revenue": 700_000_000.0, "Employees": 400, "Country": "Chile", "Founding Year": 2010},
        {"Company": "C", "Sector": "Finance", "Revenue": 50_000_000.0, "Employees": 100, "Country": "Peru", "Founding Year": 2005}
    ]))?;
    Ok(company_insights::server::create_server(Arc::new(DashboardState::new(table))))
}

async fn get_json(uri: &str) -> Result<(StatusCode, Value)> {
    let response = app()?
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (status, body) = get_json("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["companies"], 3);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_params_endpoint() -> Result<()> {
    let (status, body) = get_json("/api/dashboard").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revenue_millions"]["max"], 700);
    assert_eq!(body["employees"]["max"], 400);
    assert_eq!(body["sector_colors"][0]["sector"], "Finance");
    assert_eq!(body["tiers"], json!(["Micro", "Small", "Large"]));
    Ok(())
}

#[tokio::test]
async fn test_companies_endpoint_filters() -> Result<()> {
    let (status, body) = get_json("/api/companies").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["matched"], 3);

    let (_, body) = get_json("/api/companies?sectors=Finance&employees_max=50").await?;
    assert_eq!(body["summary"]["matched"], 1);
    assert_eq!(body["rows"][0]["company_name"], "A");

    let (_, body) = get_json("/api/companies?tiers=Large,Small&top_n=1").await?;
    assert_eq!(body["summary"]["matched"], 2);
    assert_eq!(body["top_companies"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["top_companies"][0]["company_name"], "B");
    Ok(())
}

#[tokio::test]
async fn test_bad_tier_is_a_client_error() -> Result<()> {
    let (status, body) = get_json("/api/companies?tiers=Huge").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("Huge"));
    Ok(())
}

#[tokio::test]
async fn test_report_and_insights_endpoints() -> Result<()> {
    let (status, report) = get_json("/api/report").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["summary"]["total_companies"], 3);

    let (_, insights) = get_json("/api/insights").await?;
    assert_eq!(insights, report["insights"]);
    let predominant = insights
        .as_array()
        .and_then(|all| all.iter().find(|i| i["kind"] == "predominant_sector"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(predominant["subject"], "Finance");
    Ok(())
}
