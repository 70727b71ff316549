use async_trait::async_trait;
use metrics::counter;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::DOCUMENT_ID_KEY;
use crate::error::{InsightsError, Result};
use crate::pipeline::processing::normalize::{coerce::coerce_text, Field};
use crate::types::RawRecord;

/// Document store for raw company records
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Insert documents, assigning an `_id` to those without one. Returns
    /// the number inserted.
    async fn insert_many(&self, documents: Vec<RawRecord>) -> Result<usize>;
    async fn find_all(&self) -> Result<Vec<RawRecord>>;
    async fn find_by_sector(&self, sector: &str) -> Result<Vec<RawRecord>>;
    /// Mean numeric revenue per sector, rounded to two decimals. Documents
    /// whose revenue is not a number are ignored.
    async fn average_revenue_by_sector(&self) -> Result<BTreeMap<String, f64>>;
    async fn count(&self) -> Result<usize>;
}

/// First value in `document` under any label recognized as `field`
pub fn document_field(document: &RawRecord, field: Field) -> Option<&Value> {
    document
        .iter()
        .find(|(key, value)| !value.is_null() && Field::for_label(key) == Some(field))
        .map(|(_, value)| value)
}

fn assign_ids(documents: &mut [RawRecord]) {
    for document in documents.iter_mut() {
        if !document.contains_key(DOCUMENT_ID_KEY) {
            document.insert(
                DOCUMENT_ID_KEY.to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
        }
    }
}

fn by_sector(documents: &[RawRecord], sector: &str) -> Vec<RawRecord> {
    documents
        .iter()
        .filter(|d| {
            document_field(d, Field::Sector)
                .and_then(coerce_text)
                .map_or(false, |s| s == sector)
        })
        .cloned()
        .collect()
}

fn revenue_means(documents: &[RawRecord]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for document in documents {
        let Some(sector) = document_field(document, Field::Sector).and_then(coerce_text) else {
            continue;
        };
        let Some(revenue) = document_field(document, Field::AnnualRevenue).and_then(Value::as_f64) else {
            continue;
        };
        let slot = sums.entry(sector).or_insert((0.0, 0));
        slot.0 += revenue;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(sector, (sum, n))| (sector, (sum / n as f64 * 100.0).round() / 100.0))
        .collect()
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| InsightsError::Store {
        message: "store lock poisoned".to_string(),
    })
}

/// In-memory store for development and tests
#[derive(Debug, Default, Clone)]
pub struct InMemoryCompanyStore {
    documents: Arc<Mutex<Vec<RawRecord>>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn insert_many(&self, mut documents: Vec<RawRecord>) -> Result<usize> {
        assign_ids(&mut documents);
        let inserted = documents.len();
        lock(&self.documents)?.extend(documents);

        counter!("company_store_documents_inserted_total").increment(inserted as u64);
        debug!("Inserted {} documents in memory", inserted);
        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<RawRecord>> {
        Ok(lock(&self.documents)?.clone())
    }

    async fn find_by_sector(&self, sector: &str) -> Result<Vec<RawRecord>> {
        Ok(by_sector(&lock(&self.documents)?, sector))
    }

    async fn average_revenue_by_sector(&self) -> Result<BTreeMap<String, f64>> {
        Ok(revenue_means(&lock(&self.documents)?))
    }

    async fn count(&self) -> Result<usize> {
        Ok(lock(&self.documents)?.len())
    }
}

/// Store persisted as a pretty-printed JSON array of documents
#[derive(Debug)]
pub struct JsonFileCompanyStore {
    path: PathBuf,
    documents: tokio::sync::Mutex<Vec<RawRecord>>,
}

impl JsonFileCompanyStore {
    /// Open the store at `path`, loading existing documents. A missing file
    /// is an empty store; it is created on the first insert.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str::<Vec<RawRecord>>(&content).map_err(|e| {
                InsightsError::Store {
                    message: format!("{} is not a JSON array of documents: {}", path.display(), e),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        info!("Opened store {} with {} documents", path.display(), documents.len());
        Ok(Self {
            path,
            documents: tokio::sync::Mutex::new(documents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, documents: &[RawRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(documents)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for JsonFileCompanyStore {
    async fn insert_many(&self, mut documents: Vec<RawRecord>) -> Result<usize> {
        assign_ids(&mut documents);
        let inserted = documents.len();

        let mut stored = self.documents.lock().await;
        let mut candidate = stored.clone();
        candidate.extend(documents);
        self.persist(&candidate).await?;
        *stored = candidate;

        counter!("company_store_documents_inserted_total").increment(inserted as u64);
        debug!("Inserted {} documents into {}", inserted, self.path.display());
        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<RawRecord>> {
        Ok(self.documents.lock().await.clone())
    }

    async fn find_by_sector(&self, sector: &str) -> Result<Vec<RawRecord>> {
        Ok(by_sector(&self.documents.lock().await, sector))
    }

    async fn average_revenue_by_sector(&self) -> Result<BTreeMap<String, f64>> {
        Ok(revenue_means(&self.documents.lock().await))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.documents.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            doc(json!({"nome_empresa": "A", "setor": "Finance", "receita_anual": 100.0})),
            doc(json!({"nome_empresa": "B", "setor": "Finance", "receita_anual": 201.0})),
            doc(json!({"nome_empresa": "C", "setor": "Education", "receita_anual": "R$ 5,00"})),
            doc(json!({"_id": "fixed", "nome_empresa": "D", "Sector": "Education", "Revenue": 10.0})),
        ]
    }

    #[tokio::test]
    async fn test_insert_assigns_missing_ids() {
        let store = InMemoryCompanyStore::new();
        assert_eq!(store.insert_many(sample()).await.unwrap(), 4);

        let all = store.find_all().await.unwrap();
        assert!(all.iter().all(|d| d.contains_key("_id")));
        assert_eq!(all[3]["_id"], json!("fixed"));
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_find_by_sector_accepts_any_sector_label() {
        let store = InMemoryCompanyStore::new();
        store.insert_many(sample()).await.unwrap();
        assert_eq!(store.find_by_sector("Finance").await.unwrap().len(), 2);
        assert_eq!(store.find_by_sector("Education").await.unwrap().len(), 2);
        assert!(store.find_by_sector("Mining").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_average_revenue_ignores_non_numeric() {
        let store = InMemoryCompanyStore::new();
        store.insert_many(sample()).await.unwrap();
        let means = store.average_revenue_by_sector().await.unwrap();
        assert_eq!(means["Finance"], 150.5);
        assert_eq!(means["Education"], 10.0);
    }
}
