//! Durable ledger storage on a fjall keyspace.
//!
//! Transactions live in the `transactions` partition keyed by a big-endian
//! sequence number, so key order is insertion order. Snapshots live in the
//! `snapshots` partition keyed by `YYYY-MM`; writing a key replaces it.
use crate::core::{Ledger, MonthlySnapshot, Transaction};
use anyhow::{Context, Result, anyhow};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const TRANSACTIONS: &str = "transactions";
const SNAPSHOTS: &str = "snapshots";

pub struct LedgerStore {
    keyspace: Keyspace,
    transactions: PartitionHandle,
    snapshots: PartitionHandle,
    next_seq: u64,
}

impl LedgerStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open ledger store at {}", path.display()))?;
        let transactions =
            keyspace.open_partition(TRANSACTIONS, PartitionCreateOptions::default())?;
        let snapshots = keyspace.open_partition(SNAPSHOTS, PartitionCreateOptions::default())?;

        let next_seq = match transactions.last_key_value()? {
            Some((key, _)) => decode_seq(&key)? + 1,
            None => 0,
        };
        debug!("Opened ledger store at {}, next sequence {next_seq}", path.display());

        Ok(Self {
            keyspace,
            transactions,
            snapshots,
            next_seq,
        })
    }

    /// Reads every stored record back into a ledger.
    pub fn load(&self) -> Result<Ledger> {
        let mut transactions = Vec::new();
        for item in self.transactions.iter() {
            let (key, value) = item?;
            let transaction: Transaction = serde_json::from_slice(&value).with_context(|| {
                format!("Corrupt transaction record #{}", decode_seq(&key).unwrap_or_default())
            })?;
            transactions.push(transaction);
        }

        let mut snapshots = Vec::new();
        for item in self.snapshots.iter() {
            let (key, value) = item?;
            let snapshot: MonthlySnapshot = serde_json::from_slice(&value).with_context(|| {
                format!(
                    "Corrupt snapshot record {}",
                    String::from_utf8_lossy(&key)
                )
            })?;
            snapshots.push(snapshot);
        }

        debug!(
            "Loaded {} transactions and {} snapshots",
            transactions.len(),
            snapshots.len()
        );
        Ok(Ledger::from_parts(transactions, snapshots))
    }

    pub fn append_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        let key = self.next_seq.to_be_bytes().to_vec();
        self.transactions
            .insert(key, serde_json::to_vec(transaction)?)?;
        self.next_seq += 1;
        self.persist()
    }

    pub fn put_snapshot(&self, snapshot: &MonthlySnapshot) -> Result<()> {
        self.snapshots.insert(
            snapshot.month.to_string().into_bytes(),
            serde_json::to_vec(snapshot)?,
        )?;
        self.persist()
    }

    /// Deletes every stored transaction and snapshot.
    pub fn clear(&mut self) -> Result<()> {
        for partition in [&self.transactions, &self.snapshots] {
            let keys = partition
                .keys()
                .collect::<Result<Vec<_>, _>>()?;
            for key in keys {
                partition.remove(key)?;
            }
        }
        self.next_seq = 0;
        debug!("Cleared ledger store");
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist ledger store")
    }
}

fn decode_seq(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| anyhow!("Invalid transaction key of {} bytes", key.len()))?;
    Ok(u64::from_be_bytes(bytes))
}
