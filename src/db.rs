use std::path::Path;
use std::time::Duration;

use rusqlite::backup::Backup;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Category, Kind, NewTransaction, Totals, Transaction};

pub const DB_FILE: &str = "moliya.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    date TEXT,
    type TEXT,
    category TEXT,
    amount REAL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT
);
";

const DEFAULT_CATEGORIES: &[(Kind, &[&str])] = &[
    (Kind::Income, &["Salary", "Gift", "Business", "Other income"]),
    (
        Kind::Expense,
        &["Food", "Transport", "Utilities", "Clothing", "Other expenses"],
    ),
];

/// Owned handle on the tracker database. Open once, pass by reference.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path` and make sure the
    /// schema and default categories exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!(path = %path.display(), "opened database");
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create tables and seed default categories. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.seed_default_categories()
    }

    // Check-then-insert per (name, kind). Not atomic, which is fine for a
    // single-user, single-connection tool.
    fn seed_default_categories(&self) -> Result<()> {
        let mut exists = self
            .conn
            .prepare("SELECT id FROM categories WHERE name = ?1 AND type = ?2")?;
        let mut seeded = 0;
        for (kind, names) in DEFAULT_CATEGORIES {
            for name in names.iter() {
                if !exists.exists(rusqlite::params![name, kind])? {
                    self.add_category(name, *kind)?;
                    seeded += 1;
                }
            }
        }
        if seeded > 0 {
            info!(seeded, "seeded default categories");
        }
        Ok(())
    }

    /// Category names of one kind, in the order they were added.
    pub fn list_categories(&self, kind: Kind) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories WHERE type = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map([kind], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Full category rows, optionally restricted to one kind.
    pub fn categories(&self, kind: Option<Kind>) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type FROM categories WHERE ?1 IS NULL OR type = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map([kind], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    kind: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Append a category. Duplicates are not rejected here.
    pub fn add_category(&self, name: &str, kind: Kind) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, type) VALUES (?1, ?2)",
            rusqlite::params![name, kind],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name, %kind, "added category");
        Ok(id)
    }

    /// Append a transaction as given. The caller is responsible for
    /// validation; the row is committed before this returns.
    pub fn add_transaction(&self, txn: &NewTransaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (date, type, category, amount, description) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![txn.date, txn.kind, txn.category, txn.amount, txn.note],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, date = %txn.date, kind = %txn.kind, amount = txn.amount, "added transaction");
        Ok(id)
    }

    /// All transactions, newest first. Dates compare as text, so they must be
    /// stored in a sortable `YYYY-MM-DD HH:MM` form.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, type, category, amount, description \
             FROM transactions ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Transaction {
                    id: row.get(0)?,
                    date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    kind: row.get(2)?,
                    category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    amount: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
                    note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn totals(&self) -> Result<Totals> {
        Ok(Totals {
            income: self.sum_of(Kind::Income)?,
            expense: self.sum_of(Kind::Expense)?,
        })
    }

    fn sum_of(&self, kind: Kind) -> Result<f64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE type = ?1",
            [kind],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Income minus expense over every stored transaction; 0 when empty.
    pub fn get_balance(&self) -> Result<f64> {
        Ok(self.totals()?.balance())
    }

    pub fn transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?)
    }

    pub fn category_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?)
    }

    /// Copy the live database to `dest` with SQLite's online backup.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        let mut dest_conn = Connection::open(dest)?;
        let backup = Backup::new(&self.conn, &mut dest_conn)?;
        backup.run_to_completion(100, Duration::from_millis(10), None)?;
        info!(dest = %dest.display(), "database backed up");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn txn(date: &str, kind: Kind, category: &str, amount: f64, note: &str) -> NewTransaction {
        NewTransaction {
            date: date.to_string(),
            kind,
            category: category.to_string(),
            amount,
            note: note.to_string(),
        }
    }

    #[test]
    fn test_open_creates_tables() {
        let (_dir, store) = test_store();
        let tables: Vec<String> = store
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["transactions", "categories"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_open_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join(DB_FILE);
        Store::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_seeds_default_categories() {
        let (_dir, store) = test_store();
        assert_eq!(
            store.list_categories(Kind::Income).unwrap(),
            vec!["Salary", "Gift", "Business", "Other income"]
        );
        assert_eq!(
            store.list_categories(Kind::Expense).unwrap(),
            vec!["Food", "Transport", "Utilities", "Clothing", "Other expenses"]
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (dir, store) = test_store();
        let before = store.list_categories(Kind::Income).unwrap().len();
        store.initialize().unwrap();
        drop(store);
        let reopened = Store::open(&dir.path().join("test.db")).unwrap();
        reopened.initialize().unwrap();
        assert_eq!(reopened.list_categories(Kind::Income).unwrap().len(), before);
        assert_eq!(reopened.category_count().unwrap(), 9);
    }

    #[test]
    fn test_seed_only_fills_missing_defaults() {
        let (_dir, store) = test_store();
        store
            .conn
            .execute("DELETE FROM categories WHERE name = 'Gift'", [])
            .unwrap();
        store.initialize().unwrap();
        let income = store.list_categories(Kind::Income).unwrap();
        assert_eq!(income.iter().filter(|n| *n == "Gift").count(), 1);
        assert_eq!(income.len(), 4);
    }

    #[test]
    fn test_categories_are_split_by_kind() {
        let (_dir, store) = test_store();
        store.add_category("Freelance", Kind::Income).unwrap();
        store.add_category("Rent", Kind::Expense).unwrap();
        let income = store.list_categories(Kind::Income).unwrap();
        let expense = store.list_categories(Kind::Expense).unwrap();
        assert!(income.contains(&"Freelance".to_string()));
        assert!(!income.contains(&"Rent".to_string()));
        assert!(!income.contains(&"Food".to_string()));
        assert!(expense.contains(&"Rent".to_string()));
        assert!(!expense.contains(&"Freelance".to_string()));
        assert!(!expense.contains(&"Salary".to_string()));
    }

    #[test]
    fn test_add_category_appends_and_allows_duplicates() {
        let (_dir, store) = test_store();
        store.add_category("Food", Kind::Expense).unwrap();
        let expense = store.list_categories(Kind::Expense).unwrap();
        assert_eq!(expense.last().map(String::as_str), Some("Food"));
        assert_eq!(expense.iter().filter(|n| *n == "Food").count(), 2);
    }

    #[test]
    fn test_categories_filter() {
        let (_dir, store) = test_store();
        let all = store.categories(None).unwrap();
        assert_eq!(all.len(), 9);
        let income = store.categories(Some(Kind::Income)).unwrap();
        assert_eq!(income.len(), 4);
        assert!(income.iter().all(|c| c.kind == Kind::Income));
    }

    #[test]
    fn test_empty_balance_is_zero() {
        let (_dir, store) = test_store();
        assert_eq!(store.get_balance().unwrap(), 0.0);
        assert_eq!(store.totals().unwrap(), Totals::default());
        assert!(store.list_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_balance_income_minus_expense() {
        let (_dir, store) = test_store();
        store
            .add_transaction(&txn("2024-01-01 10:00", Kind::Income, "Salary", 1000.0, ""))
            .unwrap();
        store
            .add_transaction(&txn("2024-01-01 12:30", Kind::Expense, "Food", 300.0, "lunch"))
            .unwrap();
        assert_eq!(store.get_balance().unwrap(), 700.0);
    }

    #[test]
    fn test_balance_tracks_every_insert() {
        let (_dir, store) = test_store();
        let entries = [
            (Kind::Income, 250.5),
            (Kind::Expense, 40.25),
            (Kind::Expense, 1200.0),
            (Kind::Income, 80.0),
            (Kind::Expense, 0.0),
            (Kind::Income, 5000.0),
        ];
        let mut expected = 0.0;
        for (i, (kind, amount)) in entries.iter().enumerate() {
            let date = format!("2024-02-{:02} 09:00", i + 1);
            store
                .add_transaction(&txn(&date, *kind, "Other", *amount, ""))
                .unwrap();
            expected += match kind {
                Kind::Income => *amount,
                Kind::Expense => -*amount,
            };
            assert!((store.get_balance().unwrap() - expected).abs() < 1e-9);
        }
        let totals = store.totals().unwrap();
        assert!((totals.income - 5330.5).abs() < 1e-9);
        assert!((totals.expense - 1240.25).abs() < 1e-9);
    }

    #[test]
    fn test_balance_goes_negative() {
        let (_dir, store) = test_store();
        store
            .add_transaction(&txn("2024-01-01 10:00", Kind::Expense, "Food", 45.0, ""))
            .unwrap();
        assert_eq!(store.get_balance().unwrap(), -45.0);
    }

    #[test]
    fn test_list_transactions_newest_first() {
        let (_dir, store) = test_store();
        for date in ["2024-01-01 10:00", "2024-01-03 09:00", "2024-01-02 12:00"] {
            store
                .add_transaction(&txn(date, Kind::Expense, "Food", 10.0, ""))
                .unwrap();
        }
        let dates: Vec<String> = store
            .list_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(dates, vec!["2024-01-03 09:00", "2024-01-02 12:00", "2024-01-01 10:00"]);
    }

    #[test]
    fn test_list_transactions_same_minute_latest_insert_first() {
        let (_dir, store) = test_store();
        let first = store
            .add_transaction(&txn("2024-03-01 08:00", Kind::Income, "Gift", 5.0, "a"))
            .unwrap();
        let second = store
            .add_transaction(&txn("2024-03-01 08:00", Kind::Income, "Gift", 6.0, "b"))
            .unwrap();
        let ids: Vec<i64> = store.list_transactions().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_transaction_fields_roundtrip() {
        let (_dir, store) = test_store();
        let id = store
            .add_transaction(&txn("2024-05-05 18:45", Kind::Expense, "Transport", 12.5, "taxi"))
            .unwrap();
        let rows = store.list_transactions().unwrap();
        assert_eq!(
            rows,
            vec![Transaction {
                id,
                date: "2024-05-05 18:45".to_string(),
                kind: Kind::Expense,
                category: "Transport".to_string(),
                amount: 12.5,
                note: "taxi".to_string(),
            }]
        );
    }

    #[test]
    fn test_store_does_not_validate() {
        let (_dir, store) = test_store();
        store
            .add_transaction(&txn("2024-01-01 10:00", Kind::Income, "No such category", -20.0, ""))
            .unwrap();
        assert_eq!(store.transaction_count().unwrap(), 1);
        assert_eq!(store.get_balance().unwrap(), -20.0);
    }

    #[test]
    fn test_rejects_unknown_stored_kind() {
        let (_dir, store) = test_store();
        store
            .conn
            .execute(
                "INSERT INTO transactions (date, type, category, amount, description) \
                 VALUES ('2024-01-01 00:00', 'transfer', 'x', 1.0, '')",
                [],
            )
            .unwrap();
        assert!(store.list_transactions().is_err());
    }

    #[test]
    fn test_data_survives_reopen() {
        let (dir, store) = test_store();
        store
            .add_transaction(&txn("2024-01-01 10:00", Kind::Income, "Salary", 1000.0, ""))
            .unwrap();
        drop(store);
        let reopened = Store::open(&dir.path().join("test.db")).unwrap();
        assert_eq!(reopened.transaction_count().unwrap(), 1);
        assert_eq!(reopened.get_balance().unwrap(), 1000.0);
    }

    #[test]
    fn test_backup_copies_rows() {
        let (dir, store) = test_store();
        store
            .add_transaction(&txn("2024-01-01 10:00", Kind::Income, "Salary", 1000.0, ""))
            .unwrap();
        let dest = dir.path().join("backup.db");
        store.backup_to(&dest).unwrap();
        let copy = Store::open(&dest).unwrap();
        assert_eq!(copy.transaction_count().unwrap(), 1);
        assert_eq!(copy.category_count().unwrap(), 9);
    }
}
