//! Query cache: keys, stale times and invalidation after mutations.
//!
//! Entries are fresh for the stale time of their key. A successful mutation
//! drops every entry the mutation can have changed, so the next read refetches.

use async_lock::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifies a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Accounts,
    Transactions,
    CryptoPositions,
    TopUps,
    MarketPrices,
    /// Detail of one market asset, by id.
    MarketAsset(String),
    WithdrawalMethods,
    Withdrawals,
}

impl QueryKey {
    pub fn stale_time(&self) -> Duration {
        match self {
            QueryKey::MarketPrices | QueryKey::MarketAsset(_) => Duration::from_secs(120),
            _ => Duration::from_secs(60),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Accounts => write!(f, "accounts"),
            QueryKey::Transactions => write!(f, "transactions"),
            QueryKey::CryptoPositions => write!(f, "crypto-positions"),
            QueryKey::TopUps => write!(f, "top-ups"),
            QueryKey::MarketPrices => write!(f, "market-prices"),
            QueryKey::MarketAsset(id) => write!(f, "market-asset/{}", id),
            QueryKey::WithdrawalMethods => write!(f, "withdrawal-methods"),
            QueryKey::Withdrawals => write!(f, "withdrawals"),
        }
    }
}

/// A successful write and the queries it makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    PlaceOrder,
    TopUp,
    CreateTransaction,
    CreateWithdrawalMethod,
    DeleteWithdrawalMethod,
    RequestWithdrawal,
}

impl Mutation {
    pub fn affects(&self, key: &QueryKey) -> bool {
        match self {
            // Asset detail embeds the held position and its transactions.
            Mutation::PlaceOrder => matches!(
                key,
                QueryKey::Accounts
                    | QueryKey::CryptoPositions
                    | QueryKey::Transactions
                    | QueryKey::MarketAsset(_)
            ),
            Mutation::TopUp => matches!(
                key,
                QueryKey::Accounts | QueryKey::TopUps | QueryKey::Transactions
            ),
            Mutation::CreateTransaction => {
                matches!(key, QueryKey::Transactions | QueryKey::MarketAsset(_))
            }
            Mutation::CreateWithdrawalMethod | Mutation::DeleteWithdrawalMethod => {
                matches!(key, QueryKey::WithdrawalMethods)
            }
            Mutation::RequestWithdrawal => {
                matches!(key, QueryKey::Accounts | QueryKey::Withdrawals)
            }
        }
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Type-erased query cache shared by all sub-clients.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    /// Replaces every key's stale time when set. `Duration::ZERO` disables caching.
    stale_override: Option<Duration>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_override", &self.stale_override)
            .finish_non_exhaustive()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_time(stale_time: Duration) -> Self {
        Self {
            stale_override: Some(stale_time),
            ..Self::default()
        }
    }

    fn stale_time(&self, key: &QueryKey) -> Duration {
        self.stale_override.unwrap_or_else(|| key.stale_time())
    }

    /// Fresh cached value for `key`, if one of type `T` exists.
    pub async fn get<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() >= self.stale_time(key) {
            return None;
        }
        let value = entry.value.downcast_ref::<T>()?.clone();
        tracing::debug!(key = %key, "Cache hit");
        Some(value)
    }

    pub async fn insert<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        if self.stale_time(&key).is_zero() {
            return;
        }
        self.entries.write().await.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every entry `mutation` affects.
    pub async fn invalidate(&self, mutation: Mutation) {
        self.invalidate_where(|key| mutation.affects(key)).await;
        tracing::debug!(?mutation, "Invalidated queries");
    }

    pub async fn invalidate_key(&self, key: &QueryKey) {
        self.entries.write().await.remove(key);
    }

    pub async fn invalidate_where(&self, predicate: impl Fn(&QueryKey) -> bool) {
        self.entries.write().await.retain(|key, _| !predicate(key));
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_times_per_key() {
        assert_eq!(QueryKey::Accounts.stale_time(), Duration::from_secs(60));
        assert_eq!(QueryKey::Withdrawals.stale_time(), Duration::from_secs(60));
        assert_eq!(QueryKey::MarketPrices.stale_time(), Duration::from_secs(120));
        assert_eq!(
            QueryKey::MarketAsset("bitcoin".into()).stale_time(),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn key_display_matches_query_names() {
        assert_eq!(QueryKey::CryptoPositions.to_string(), "crypto-positions");
        assert_eq!(
            QueryKey::MarketAsset("eth".into()).to_string(),
            "market-asset/eth"
        );
    }

    #[test]
    fn mutation_invalidation_table() {
        use Mutation::*;
        use QueryKey::*;

        assert!(PlaceOrder.affects(&Accounts));
        assert!(PlaceOrder.affects(&CryptoPositions));
        assert!(PlaceOrder.affects(&Transactions));
        assert!(PlaceOrder.affects(&MarketAsset("bitcoin".into())));
        assert!(!PlaceOrder.affects(&MarketPrices));

        assert!(CreateTransaction.affects(&Transactions));
        assert!(CreateTransaction.affects(&MarketAsset("ethereum".into())));
        assert!(!CreateTransaction.affects(&Accounts));
        assert!(!CreateTransaction.affects(&MarketPrices));

        assert!(TopUp.affects(&Accounts));
        assert!(TopUp.affects(&TopUps));
        assert!(TopUp.affects(&Transactions));
        assert!(!TopUp.affects(&CryptoPositions));

        assert!(CreateWithdrawalMethod.affects(&WithdrawalMethods));
        assert!(DeleteWithdrawalMethod.affects(&WithdrawalMethods));
        assert!(!DeleteWithdrawalMethod.affects(&Withdrawals));

        assert!(RequestWithdrawal.affects(&Accounts));
        assert!(RequestWithdrawal.affects(&Withdrawals));
        assert!(!RequestWithdrawal.affects(&WithdrawalMethods));
    }

    #[tokio::test]
    async fn get_returns_typed_fresh_values() {
        let cache = QueryCache::new();
        cache.insert(QueryKey::Accounts, vec![1u32, 2, 3]).await;

        assert_eq!(cache.get::<Vec<u32>>(&QueryKey::Accounts).await, Some(vec![1, 2, 3]));
        assert_eq!(cache.get::<String>(&QueryKey::Accounts).await, None);
        assert_eq!(cache.get::<Vec<u32>>(&QueryKey::Transactions).await, None);
    }

    #[tokio::test]
    async fn invalidate_drops_affected_keys_only() {
        let cache = QueryCache::new();
        cache.insert(QueryKey::Accounts, 1u8).await;
        cache.insert(QueryKey::MarketPrices, 2u8).await;
        cache.insert(QueryKey::MarketAsset("btc".into()), 3u8).await;

        cache.invalidate(Mutation::PlaceOrder).await;

        assert!(!cache.contains(&QueryKey::Accounts).await);
        assert!(!cache.contains(&QueryKey::MarketAsset("btc".into())).await);
        assert!(cache.contains(&QueryKey::MarketPrices).await);
    }

    #[tokio::test]
    async fn zero_stale_time_disables_caching() {
        let cache = QueryCache::with_stale_time(Duration::ZERO);
        cache.insert(QueryKey::Accounts, 1u8).await;
        assert!(!cache.contains(&QueryKey::Accounts).await);
        assert_eq!(cache.get::<u8>(&QueryKey::Accounts).await, None);
    }
}
