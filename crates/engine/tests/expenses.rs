use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, Expense, ExpenseDraft, ExpenseFields, Money};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fields(
    description: &str,
    cents: i64,
    category: &str,
    on: NaiveDate,
    notes: Option<&str>,
) -> ExpenseFields {
    ExpenseDraft {
        description: Some(description.to_string()),
        amount: Some(Decimal::new(cents, 2)),
        category: Some(category.to_string()),
        date: Some(on),
        notes: notes.map(ToString::to_string),
    }
    .validate()
    .unwrap()
}

fn coffee() -> ExpenseFields {
    fields("Coffee", 4_50, "Dining", date(2024, 1, 1), None)
}

fn ids(expenses: &[Expense]) -> Vec<i64> {
    let mut ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids
}

async fn seed(engine: &Engine) -> Vec<Expense> {
    let rows = [
        fields(
            "Grocery shopping at Walmart",
            125_50,
            "Groceries",
            date(2024, 1, 10),
            Some("Weekly grocery shopping"),
        ),
        fields("Gas station fill-up", 45_75, "Transportation", date(2024, 1, 12), None),
        fields("Electric bill payment", 89_30, "Utilities", date(2024, 1, 5), None),
        fields("Lunch at restaurant", 25_00, "Dining", date(2024, 1, 13), None),
        fields("Grocery top-up", 10_10, "Groceries", date(2024, 2, 1), None),
    ];
    let mut stored = Vec::new();
    for row in rows {
        stored.push(engine.create_expense(row).await.unwrap());
    }
    stored
}

#[tokio::test]
async fn create_then_get_returns_the_same_fields() {
    let (engine, _db) = engine_with_db().await;

    let created = engine.create_expense(coffee()).await.unwrap();
    assert!(created.id > 0);

    let stored = engine.expense(created.id).await.unwrap().unwrap();
    assert_eq!(stored, created);
    assert_eq!(stored.description, "Coffee");
    assert_eq!(stored.amount, Money::new(450));
    assert_eq!(stored.amount.to_decimal(), Decimal::new(450, 2));
    assert_eq!(stored.category, "Dining");
    assert_eq!(stored.date, date(2024, 1, 1));
    assert_eq!(stored.notes, None);
}

#[tokio::test]
async fn ids_are_unique_and_listed() {
    let (engine, _db) = engine_with_db().await;

    let first = engine.create_expense(coffee()).await.unwrap();
    let second = engine.create_expense(coffee()).await.unwrap();
    assert_ne!(first.id, second.id);

    let all = engine.list_expenses().await.unwrap();
    assert_eq!(ids(&all), ids(&[first, second]));
    assert_eq!(engine.count_expenses().await.unwrap(), 2);
}

#[tokio::test]
async fn missing_ids_are_none_or_not_found() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(engine.expense(42).await.unwrap(), None);
    assert!(matches!(
        engine.update_expense(42, coffee()).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_expense(42).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let (engine, _db) = engine_with_db().await;
    let created = engine.create_expense(coffee()).await.unwrap();

    let replacement = fields(
        "Espresso",
        2_20,
        "Coffee shops",
        date(2024, 1, 2),
        Some("double"),
    );
    let updated = engine
        .update_expense(created.id, replacement)
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);

    let stored = engine.expense(created.id).await.unwrap().unwrap();
    assert_eq!(
        stored,
        Expense {
            id: created.id,
            description: "Espresso".to_string(),
            amount: Money::new(220),
            category: "Coffee shops".to_string(),
            date: date(2024, 1, 2),
            notes: Some("double".to_string()),
        }
    );
    assert_eq!(engine.count_expenses().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_is_final() {
    let (engine, _db) = engine_with_db().await;
    let created = engine.create_expense(coffee()).await.unwrap();

    engine.delete_expense(created.id).await.unwrap();
    assert_eq!(engine.expense(created.id).await.unwrap(), None);
    assert_eq!(
        engine.delete_expense(created.id).await,
        Err(EngineError::KeyNotFound(format!("expense {}", created.id)))
    );
}

#[tokio::test]
async fn category_filter_is_exact() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let groceries = engine.expenses_by_category("Groceries").await.unwrap();
    assert_eq!(ids(&groceries), vec![stored[0].id, stored[4].id]);

    assert!(engine.expenses_by_category("groceries").await.unwrap().is_empty());
    assert!(engine.expenses_by_category("Grocer").await.unwrap().is_empty());
}

#[tokio::test]
async fn date_range_is_inclusive() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let january = engine
        .expenses_by_date_range(date(2024, 1, 5), date(2024, 1, 12))
        .await
        .unwrap();
    assert_eq!(ids(&january), vec![stored[0].id, stored[1].id, stored[2].id]);

    let single_day = engine
        .expenses_by_date_range(date(2024, 2, 1), date(2024, 2, 1))
        .await
        .unwrap();
    assert_eq!(ids(&single_day), vec![stored[4].id]);
}

#[tokio::test]
async fn reversed_date_range_is_empty() {
    let (engine, _db) = engine_with_db().await;
    seed(&engine).await;

    let reversed = engine
        .expenses_by_date_range(date(2024, 12, 31), date(2024, 1, 1))
        .await
        .unwrap();
    assert!(reversed.is_empty());
    assert_eq!(
        engine
            .total_by_date_range(date(2024, 12, 31), date(2024, 1, 1))
            .await
            .unwrap(),
        Money::ZERO
    );
}

#[tokio::test]
async fn category_and_date_range_combine() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let january_groceries = engine
        .expenses_by_category_and_date_range("Groceries", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(ids(&january_groceries), vec![stored[0].id]);

    let none = engine
        .expenses_by_category_and_date_range("Dining", date(2024, 2, 1), date(2024, 2, 28))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn amount_threshold_is_strict() {
    let (engine, _db) = engine_with_db().await;
    let cheap = engine
        .create_expense(fields("Cheap", 50_00, "Misc", date(2024, 1, 1), None))
        .await
        .unwrap();
    let pricey = engine
        .create_expense(fields("Pricey", 150_00, "Misc", date(2024, 1, 1), None))
        .await
        .unwrap();
    let exact = engine
        .create_expense(fields("Exact", 100_00, "Misc", date(2024, 1, 1), None))
        .await
        .unwrap();

    let above = engine
        .expenses_above_amount(Decimal::new(100_00, 2))
        .await
        .unwrap();
    assert_eq!(ids(&above), vec![pricey.id]);

    // a sub-cent threshold still compares against the exact value
    let above = engine
        .expenses_above_amount(Decimal::new(99_995, 3))
        .await
        .unwrap();
    assert_eq!(ids(&above), vec![pricey.id, exact.id]);

    let everything = engine.expenses_above_amount(Decimal::ZERO).await.unwrap();
    assert_eq!(ids(&everything), vec![cheap.id, pricey.id, exact.id]);

    assert!(engine.expenses_above_amount(Decimal::MAX).await.unwrap().is_empty());
    assert_eq!(
        engine.expenses_above_amount(Decimal::MIN).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn keyword_search_ignores_case() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let found = engine.search_expenses("grocery").await.unwrap();
    assert_eq!(ids(&found), vec![stored[0].id, stored[4].id]);

    let found = engine.search_expenses("WALMART").await.unwrap();
    assert_eq!(ids(&found), vec![stored[0].id]);

    assert!(engine.search_expenses("rent").await.unwrap().is_empty());
}

#[tokio::test]
async fn keyword_search_folds_non_ascii_letters() {
    let (engine, _db) = engine_with_db().await;
    let dessert = engine
        .create_expense(fields("Café CRÈME", 3_20, "Dining", date(2024, 1, 1), None))
        .await
        .unwrap();
    engine
        .create_expense(fields("Cafe creme", 3_20, "Dining", date(2024, 1, 1), None))
        .await
        .unwrap();

    for keyword in ["CRÈME", "crème", "Crème", "CAFÉ"] {
        let found = engine.search_expenses(keyword).await.unwrap();
        assert_eq!(ids(&found), vec![dessert.id], "keyword {keyword}");
    }
}

#[tokio::test]
async fn empty_keyword_matches_everything() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let found = engine.search_expenses("").await.unwrap();
    assert_eq!(ids(&found), ids(&stored));
}

#[tokio::test]
async fn keyword_wildcards_are_literal() {
    let (engine, _db) = engine_with_db().await;
    let sale = engine
        .create_expense(fields("Shoes 50% off", 30_00, "Clothing", date(2024, 1, 1), None))
        .await
        .unwrap();
    engine
        .create_expense(fields("Shoes 500 off", 30_00, "Clothing", date(2024, 1, 1), None))
        .await
        .unwrap();

    let found = engine.search_expenses("50%").await.unwrap();
    assert_eq!(ids(&found), vec![sale.id]);
    assert!(engine.search_expenses("_").await.unwrap().is_empty());
}

#[tokio::test]
async fn total_by_category_is_exact_and_sparse() {
    let (engine, _db) = engine_with_db().await;
    let stored = seed(&engine).await;

    let totals = engine.total_by_category().await.unwrap();
    assert_eq!(totals.len(), 4);
    assert_eq!(totals["Groceries"], Money::new(125_50 + 10_10));
    assert_eq!(totals["Transportation"], Money::new(45_75));
    assert_eq!(totals["Utilities"], Money::new(89_30));
    assert_eq!(totals["Dining"], Money::new(25_00));

    engine.delete_expense(stored[3].id).await.unwrap();
    let totals = engine.total_by_category().await.unwrap();
    assert!(!totals.contains_key("Dining"));
    assert!(totals.values().all(|total| total.is_positive()));
}

#[tokio::test]
async fn total_by_date_range_sums_exactly() {
    let (engine, _db) = engine_with_db().await;
    seed(&engine).await;

    let january = engine
        .total_by_date_range(date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(january, Money::new(125_50 + 45_75 + 89_30 + 25_00));
    assert_eq!(january.to_decimal().to_string(), "285.55");

    let empty = engine
        .total_by_date_range(date(2023, 1, 1), date(2023, 12, 31))
        .await
        .unwrap();
    assert_eq!(empty, Money::ZERO);
}

#[tokio::test]
async fn tenths_add_up_without_drift() {
    let (engine, _db) = engine_with_db().await;
    for _ in 0..10 {
        engine
            .create_expense(fields("Gum", 10, "Snacks", date(2024, 1, 1), None))
            .await
            .unwrap();
    }

    let total = engine
        .total_by_date_range(date(2024, 1, 1), date(2024, 1, 1))
        .await
        .unwrap();
    assert_eq!(total.to_decimal(), Decimal::ONE);
}

#[tokio::test]
async fn amounts_are_stored_as_cents() {
    let (engine, db) = engine_with_db().await;
    let created = engine.create_expense(coffee()).await.unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT amount_minor FROM expenses WHERE id = ?",
            vec![created.id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let cents: i64 = row.try_get("", "amount_minor").unwrap();
    assert_eq!(cents, 450);
}
