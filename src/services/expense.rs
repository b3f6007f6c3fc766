//! Expense service
//!
//! Lists, records, edits and deletes expenses, and fetches the server-side
//! aggregates used by reports.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::{MonetaError, MonetaResult};
use crate::models::{
    BudgetCycle, CategoryId, CategoryTotal, DailyTotal, Expense, ExpenseDraft, ExpenseId,
    ExpenseQuery, Money,
};

/// Start of the "all time" range
const EPOCH: &str = "1970-01-01";

/// Page size used when fetching every expense in a date range
const BATCH_SIZE: u32 = 500;

/// One page of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePage {
    pub expenses: Vec<Expense>,
    pub page: u32,
    pub size: u32,
    /// Total matching expenses, when the server reports it
    pub total_count: Option<u64>,
}

impl ExpensePage {
    /// Number of pages, when the total is known
    pub fn total_pages(&self) -> Option<u64> {
        let size = u64::from(self.size.max(1));
        self.total_count.map(|total| total.div_ceil(size))
    }

    pub fn has_next(&self) -> bool {
        match self.total_pages() {
            Some(pages) => u64::from(self.page) + 1 < pages,
            None => self.expenses.len() as u32 >= self.size,
        }
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    client: &'a ApiClient,
    today: NaiveDate,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(client: &'a ApiClient) -> Self {
        Self::with_today(client, Local::now().date_naive())
    }

    /// Create a service with an explicit "today"; expenses dated after it
    /// are rejected
    pub fn with_today(client: &'a ApiClient, today: NaiveDate) -> Self {
        Self { client, today }
    }

    /// List expenses matching `query`
    pub fn list(&self, query: &ExpenseQuery) -> MonetaResult<ExpensePage> {
        let (expenses, total_count) = self.client.get_page("/expenses", &query.to_params())?;
        debug!("fetched {} expenses (page {})", expenses.len(), query.page);
        Ok(ExpensePage {
            expenses,
            page: query.page,
            size: query.size,
            total_count,
        })
    }

    /// Every expense between two dates, following pages until the last one
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> MonetaResult<Vec<Expense>> {
        let mut query = ExpenseQuery {
            start_date: Some(start),
            end_date: Some(end),
            ..ExpenseQuery::page(0, BATCH_SIZE)
        };

        let mut expenses = Vec::new();
        loop {
            let page = self.list(&query)?;
            let more = page.has_next() && !page.expenses.is_empty();
            expenses.extend(page.expenses);
            if !more {
                break;
            }
            query.page += 1;
        }
        Ok(expenses)
    }

    /// Expenses recorded on one day
    pub fn for_day(&self, date: NaiveDate) -> MonetaResult<Vec<Expense>> {
        let query = [
            ("year", date.year().to_string()),
            ("month", date.month().to_string()),
            ("day", date.day().to_string()),
        ];
        self.client.get_list("/expenses/filter", &query)
    }

    /// Record several expenses.
    ///
    /// Incomplete drafts are skipped; it is an error if none are left.
    /// Returns the created expenses.
    pub fn add_many(&self, drafts: &[ExpenseDraft]) -> MonetaResult<Vec<Expense>> {
        let complete: Vec<&ExpenseDraft> = drafts.iter().filter(|d| d.is_complete()).collect();
        if complete.is_empty() {
            return Err(MonetaError::Validation(
                "Please add at least one complete expense (description, category and a positive amount)"
                    .into(),
            ));
        }
        for draft in &complete {
            self.check_date(draft.expense_date)?;
        }

        let skipped = drafts.len() - complete.len();
        if skipped > 0 {
            debug!("skipping {} incomplete expense rows", skipped);
        }

        let mut created = Vec::with_capacity(complete.len());
        for draft in complete {
            let expense: Expense = self.client.post("/expenses", &[], draft)?;
            created.push(expense);
        }
        info!("recorded {} expenses", created.len());
        Ok(created)
    }

    /// Replace an existing expense
    pub fn update(&self, id: ExpenseId, draft: &ExpenseDraft) -> MonetaResult<()> {
        if !draft.is_complete() {
            return Err(MonetaError::Validation(
                "An expense needs a description and a positive amount".into(),
            ));
        }
        self.check_date(draft.expense_date)?;

        self.client
            .put(&format!("/expenses/{}", id), draft)
            .map_err(|e| not_found_as_expense(e, id))
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> MonetaResult<()> {
        self.client
            .delete(&format!("/expenses/{}", id))
            .map_err(|e| not_found_as_expense(e, id))?;
        info!("deleted expense {}", id);
        Ok(())
    }

    /// Total spent in a cycle
    pub fn total(&self, cycle: &BudgetCycle) -> MonetaResult<Money> {
        self.client.get("/expenses/total", &cycle.query_params())
    }

    /// Totals per category name, for a cycle or for all time up to today
    pub fn totals_by_category(&self, cycle: Option<&BudgetCycle>) -> MonetaResult<Vec<CategoryTotal>> {
        let range = match cycle {
            Some(cycle) => cycle.query_params(),
            None => [
                ("startDate", EPOCH.to_string()),
                ("endDate", self.today.format("%Y-%m-%d").to_string()),
            ],
        };
        self.client.get_list("/expenses/total/category", &range)
    }

    /// The most recent expense in a category, if it has any
    pub fn latest_in_category(&self, id: CategoryId) -> MonetaResult<Option<Expense>> {
        let query = ExpenseQuery {
            category_id: Some(id),
            newest_first: true,
            ..ExpenseQuery::page(0, 1)
        };
        Ok(self.list(&query)?.expenses.into_iter().next())
    }

    /// Totals per day within a cycle (days without spending are omitted)
    pub fn daily_totals(&self, cycle: &BudgetCycle) -> MonetaResult<Vec<DailyTotal>> {
        self.client
            .get_list("/expenses/total/daily", &cycle.query_params())
    }

    fn check_date(&self, date: NaiveDate) -> MonetaResult<()> {
        if date > self.today {
            return Err(MonetaError::Validation(format!(
                "Expense date {} is in the future",
                date.format("%Y-%m-%d")
            )));
        }
        Ok(())
    }
}

fn not_found_as_expense(err: MonetaError, id: ExpenseId) -> MonetaError {
    match err {
        MonetaError::NotFound { .. } => MonetaError::expense_not_found(id.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::ApiResponse;
    use crate::models::{CategoryId, PreferredDay};
    use crate::session::Session;
    use reqwest::Method;
    use serde_json::{json, Value};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(description: &str, cents: i64, on: NaiveDate) -> ExpenseDraft {
        ExpenseDraft::new(description, CategoryId::new(2), Money::from_cents(cents), on)
    }

    fn expense_json(id: i64, amount: f64) -> Value {
        json!({"id": id, "description": "Lunch", "categoryId": 2,
               "categoryName": "Food & Dining", "amount": amount,
               "expenseDate": "2024-05-02"})
    }

    #[test]
    fn test_list_passes_filters_and_total() {
        let mock = MockTransport::new().respond_with(
            Method::GET,
            "/expenses",
            ApiResponse::new(200, json!([expense_json(1, 12.5)])).with_total_count(21),
        );
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());

        let query = ExpenseQuery {
            category_id: Some(CategoryId::new(2)),
            newest_first: true,
            ..ExpenseQuery::page(1, 10)
        };
        let page = ExpenseService::new(&client).list(&query).unwrap();
        assert_eq!(page.expenses.len(), 1);
        assert_eq!(page.total_pages(), Some(3));
        assert!(page.has_next());

        let sent = log.last().unwrap();
        assert_eq!(sent.query_value("categoryId"), Some("2"));
        assert_eq!(sent.query_value("sortDir"), Some("desc"));
        assert_eq!(sent.query_value("page"), Some("1"));
    }

    #[test]
    fn test_for_day_query() {
        let mock = MockTransport::new().respond(Method::GET, "/expenses/filter", 200, json!([]));
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());

        let expenses = ExpenseService::new(&client)
            .for_day(date(2024, 3, 7))
            .unwrap();
        assert!(expenses.is_empty());

        let sent = log.last().unwrap();
        assert_eq!(sent.query_value("year"), Some("2024"));
        assert_eq!(sent.query_value("month"), Some("3"));
        assert_eq!(sent.query_value("day"), Some("7"));
    }

    #[test]
    fn test_add_many_skips_incomplete() {
        let mock = MockTransport::new().respond(Method::POST, "/expenses", 201, expense_json(5, 80.0));
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());
        let service = ExpenseService::with_today(&client, date(2024, 5, 10));

        let created = service
            .add_many(&[
                draft("Coffee", 8000, date(2024, 5, 2)),
                draft("  ", 500, date(2024, 5, 2)),
                draft("Refund", 0, date(2024, 5, 2)),
            ])
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(log.count(), 1);

        let body = log.last().unwrap().body.unwrap();
        assert_eq!(
            body,
            json!({"description": "Coffee", "categoryId": 2, "amount": 80.0, "expenseDate": "2024-05-02"})
        );
    }

    #[test]
    fn test_add_many_none_complete() {
        let mock = MockTransport::new();
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());
        let err = ExpenseService::with_today(&client, date(2024, 5, 10))
            .add_many(&[draft("", 100, date(2024, 5, 2))])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(log.count(), 0);
    }

    #[test]
    fn test_future_date_rejected() {
        let client = ApiClient::new(MockTransport::new(), Session::default());
        let service = ExpenseService::with_today(&client, date(2024, 5, 10));
        let err = service
            .add_many(&[draft("Tickets", 100, date(2024, 5, 11))])
            .unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }

    #[test]
    fn test_update_and_missing_expense() {
        let mock = MockTransport::new()
            .respond(Method::PUT, "/expenses/4", 200, Value::Null)
            .respond(Method::DELETE, "/expenses/8", 404, Value::Null);
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());
        let service = ExpenseService::with_today(&client, date(2024, 5, 10));

        service
            .update(ExpenseId::new(4), &draft("Taxi", 35000, date(2024, 5, 9)))
            .unwrap();
        assert_eq!(log.matching(Method::PUT, "/expenses/4").len(), 1);

        let err = service.delete(ExpenseId::new(8)).unwrap_err();
        assert_eq!(err.to_string(), "Expense not found: 8");
    }

    #[test]
    fn test_between_follows_pages() {
        let mock = MockTransport::new()
            .respond_with(
                Method::GET,
                "/expenses",
                ApiResponse::new(200, json!([expense_json(1, 10.0), expense_json(2, 20.0)]))
                    .with_total_count(u64::from(BATCH_SIZE) + 1),
            )
            .respond_with(
                Method::GET,
                "/expenses",
                ApiResponse::new(200, json!([expense_json(3, 30.0)]))
                    .with_total_count(u64::from(BATCH_SIZE) + 1),
            );
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());

        let expenses = ExpenseService::new(&client)
            .between(date(2024, 1, 1), date(2024, 6, 30))
            .unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[2].id, ExpenseId::new(3));

        let sent = log.matching(Method::GET, "/expenses");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].query_value("page"), Some("0"));
        assert_eq!(sent[1].query_value("page"), Some("1"));
        assert_eq!(sent[1].query_value("startDate"), Some("2024-01-01"));
    }

    #[test]
    fn test_between_stops_on_short_page() {
        let mock = MockTransport::new().respond(
            Method::GET,
            "/expenses",
            200,
            json!([expense_json(1, 10.0)]),
        );
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());

        let expenses = ExpenseService::new(&client)
            .between(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(log.count(), 1);
    }

    #[test]
    fn test_cycle_aggregates() {
        let mock = MockTransport::new()
            .respond(Method::GET, "/expenses/total", 200, json!(1234.5))
            .respond(
                Method::GET,
                "/expenses/total/category",
                200,
                json!([{"category": "Travel", "total": 1000}, {"category": "Food", "total": "234.50"}]),
            )
            .respond(
                Method::GET,
                "/expenses/total/daily",
                200,
                json!([{"date": "2024-01-02", "total": 50}]),
            );
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());
        let service = ExpenseService::new(&client);
        let cycle = BudgetCycle::resolve(PreferredDay::new(15).unwrap(), date(2024, 1, 10));

        assert_eq!(service.total(&cycle).unwrap(), Money::from_cents(123450));
        let by_category = service.totals_by_category(Some(&cycle)).unwrap();
        assert_eq!(by_category[1].total, Money::from_cents(23450));
        let daily = service.daily_totals(&cycle).unwrap();
        assert_eq!(daily[0].date, date(2024, 1, 2));

        let sent = log.matching(Method::GET, "/expenses/total/category");
        assert_eq!(sent[0].query_value("startDate"), Some("2023-12-15"));
        assert_eq!(sent[0].query_value("endDate"), Some("2024-01-14"));
    }

    #[test]
    fn test_empty_total_is_zero() {
        let mock = MockTransport::new().respond(Method::GET, "/expenses/total", 200, Value::Null);
        let client = ApiClient::new(mock, Session::default());
        let cycle = BudgetCycle::resolve(PreferredDay::default(), date(2024, 1, 10));
        assert_eq!(ExpenseService::new(&client).total(&cycle).unwrap(), Money::zero());
    }
}
