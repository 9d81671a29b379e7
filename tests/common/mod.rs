#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ledger_stats::domain::{Category, CategoryKind, LedgerSnapshot, Transaction, TransactionKind};
use uuid::Uuid;

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at_time(year, month, day, 12, 0)
}

pub fn at_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

/// Food(Groceries, Restaurants) and Transport on the expense side, Salary on
/// the income side, with bookings spread over the first quarter of 2024.
pub struct Household {
    pub snapshot: LedgerSnapshot,
    pub food: Uuid,
    pub groceries: Uuid,
    pub restaurants: Uuid,
    pub transport: Uuid,
    pub salary: Uuid,
}

pub fn household() -> Household {
    let food = Category::new("Food", CategoryKind::Expense);
    let groceries = Category::new("Groceries", CategoryKind::Expense).with_parent(food.id);
    let restaurants = Category::new("Restaurants", CategoryKind::Expense)
        .with_parent(food.id)
        .with_order(1);
    let transport = Category::new("Transport", CategoryKind::Expense).with_order(1);
    let salary = Category::new("Salary", CategoryKind::Income);

    let transactions = vec![
        Transaction::new(TransactionKind::Expense, Some(food.id), at(2024, 1, 10), 50),
        Transaction::new(TransactionKind::Expense, Some(groceries.id), at(2024, 1, 15), 300),
        Transaction::new(TransactionKind::Expense, Some(groceries.id), at(2024, 2, 3), 100),
        Transaction::new(TransactionKind::Expense, Some(restaurants.id), at(2024, 2, 20), 150),
        Transaction::new(TransactionKind::ReturnExpense, Some(restaurants.id), at(2024, 3, 1), 50),
        Transaction::new(
            TransactionKind::Expense,
            Some(transport.id),
            at_time(2024, 3, 31, 23, 30),
            200,
        ),
        Transaction::new(TransactionKind::Income, Some(salary.id), at(2024, 1, 31), 1000),
    ];

    Household {
        food: food.id,
        groceries: groceries.id,
        restaurants: restaurants.id,
        transport: transport.id,
        salary: salary.id,
        snapshot: LedgerSnapshot::new(
            // Deliberately out of display order.
            vec![transport, restaurants, salary, groceries, food],
            transactions,
        ),
    }
}

pub fn expense_categories(snapshot: &LedgerSnapshot) -> Vec<Category> {
    snapshot
        .categories
        .iter()
        .filter(|category| category.kind == CategoryKind::Expense)
        .cloned()
        .collect()
}

pub fn expense_transactions(snapshot: &LedgerSnapshot) -> Vec<Transaction> {
    snapshot
        .transactions
        .iter()
        .filter(|txn| txn.kind.category_kind() == CategoryKind::Expense)
        .cloned()
        .collect()
}
