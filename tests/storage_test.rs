use anyhow::Result;
use company_insights::generator::{generate_companies, SECTORS};
use company_insights::pipeline::CompanyPipeline;
use company_insights::storage::{CompanyStore, JsonFileCompanyStore};
use company_insights::types::RawTable;
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn test_json_file_store_persists_across_reopen() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("companies.json");

    let store = JsonFileCompanyStore::open(&path).await?;
    assert_eq!(store.count().await?, 0);
    assert!(!path.exists());

    let inserted = store.insert_many(generate_companies(25, Some(5))).await?;
    assert_eq!(inserted, 25);
    assert!(path.exists());

    let reopened = JsonFileCompanyStore::open(&path).await?;
    let documents = reopened.find_all().await?;
    assert_eq!(documents.len(), 25);
    assert!(documents.iter().all(|d| d.get("_id").map_or(false, |v| v.is_string())));

    let by_sector: usize = {
        let mut total = 0;
        for sector in SECTORS {
            total += reopened.find_by_sector(sector).await?.len();
        }
        total
    };
    assert_eq!(by_sector, 25);
    Ok(())
}

#[tokio::test]
async fn test_store_contents_feed_the_pipeline() -> Result<()> {
    let dir = tempdir()?;
    let store = JsonFileCompanyStore::open(dir.path().join("companies.json")).await?;
    store
        .insert_many(vec![
            json!({"nome_empresa": "Alpha", "setor": "Finance", "receita_anual": 100.0})
                .as_object()
                .cloned()
                .unwrap_or_default(),
            json!({"nome_empresa": "Beta", "setor": "Finance", "receita_anual": 200.0})
                .as_object()
                .cloned()
                .unwrap_or_default(),
            json!({"nome_empresa": "Gamma", "setor": "Finance", "receita_anual": "n/a"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        ])
        .await?;

    let means = store.average_revenue_by_sector().await?;
    assert_eq!(means.get("Finance"), Some(&150.0));

    let table = CompanyPipeline::default().normalize(&RawTable::from_records(store.find_all().await?));
    assert_eq!(table.len(), 3);
    assert!(table.records.iter().all(|r| r.id.is_some()));
    assert_eq!(table.records[2].annual_revenue, None);
    Ok(())
}

#[tokio::test]
async fn test_malformed_store_file_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("companies.json");
    std::fs::write(&path, "{\"not\": \"an array\"}")?;
    assert!(JsonFileCompanyStore::open(&path).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_store_unchanged() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("companies.json");
    let store = JsonFileCompanyStore::open(&path).await?;
    store.insert_many(generate_companies(2, Some(9))).await?;

    // A directory at the store path makes the next write fail
    std::fs::remove_file(&path)?;
    std::fs::create_dir(&path)?;

    assert!(store.insert_many(generate_companies(3, Some(10))).await.is_err());
    assert_eq!(store.count().await?, 2);
    assert_eq!(store.find_all().await?.len(), 2);
    Ok(())
}
