use nl2sql::engine::Engine;
use nl2sql::plan::{Captures, Plan, Template};
use nl2sql::rules::{Recognizer, RuleTable};

fn narrow(c: &Captures) -> Plan {
    Plan::new("select ?1 as product").bind(c.get(1).unwrap_or_default())
}

fn broad() -> Recognizer {
    Recognizer::new("broad", "Anything about sales", &[r"sales"], Template::Static("select 'broad'")).unwrap()
}

fn specific() -> Recognizer {
    Recognizer::new("narrow", "Sales of one product", &[r"sales\s+of\s+(\w+)"], Template::Generator(narrow)).unwrap()
}

#[test]
fn earlier_recognizer_wins_over_later() {
    let mut rules = RuleTable::new();
    rules.push(broad()).push(specific());
    let engine = Engine::with_rules(rules);
    let found = engine.translate("sales of widgets").matched().expect("match");
    assert_eq!(found.recognizer.name(), "broad");
    assert_eq!(found.sql(), "select 'broad'");

    // swapping the order swaps the winner
    let mut rules = RuleTable::new();
    rules.push(specific()).push(broad());
    let engine = Engine::with_rules(rules);
    let found = engine.translate("sales of widgets").matched().expect("match");
    assert_eq!(found.recognizer.name(), "narrow");
    assert_eq!(found.plan.params().len(), 1);
    assert_eq!(found.plan.params()[0].as_str(), Some("widgets"));
    // the broad one still catches what the narrow one doesn't
    let found = engine.translate("total sales").matched().expect("match");
    assert_eq!(found.recognizer.name(), "broad");
}

#[test]
fn earlier_variant_wins_within_a_recognizer() {
    let recognizer = Recognizer::new(
        "either",
        "Two phrasings",
        &[r"first\s+(\w+)", r"(\w+)\s+second"],
        Template::Static("select 1"),
    )
    .unwrap();
    let mut rules = RuleTable::new();
    rules.push(recognizer);
    let engine = Engine::with_rules(rules);
    let found = engine.translate("first alpha second").matched().expect("match");
    assert_eq!(found.variant, 0);
    assert_eq!(found.captures.get(1), Some("alpha"));
    assert_eq!(found.pattern(), r"first\s+(\w+)");
    let found = engine.translate("beta second").matched().expect("match");
    assert_eq!(found.variant, 1);
    assert_eq!(found.captures.get(1), Some("beta"));
}

#[test]
fn builtin_order_resolves_overlaps() {
    let engine = Engine::new().unwrap();
    let winner = |query: &str| engine.translate(query).matched().expect("match").recognizer.name();
    // a department filter is more specific than the full staff list
    assert_eq!(winner("Show me all employees in engineering"), "department_employees");
    // a month breakdown is more specific than the grand total
    assert_eq!(winner("What are the total sales by month?"), "monthly_sales");
    // "sales to" names a customer, not a product
    assert_eq!(winner("Sales to Acme Corp"), "customer_purchases");
    // a date is more specific than a product summary
    assert_eq!(winner("Sales of Wireless Mouse on 2023-01-20"), "product_sales_on_date");
    assert_eq!(winner("Sales of Wireless Mouse"), "product_sales_summary");
    assert_eq!(winner("Sales of Electronics products"), "category_revenue");
    // the full staff list only answers when nothing follows "employees"
    assert_eq!(winner("Show me employees with the highest salary"), "top_paid_employees");
    assert_eq!(winner("Show me employees hired in the last 2 years"), "recent_hires");
    assert_eq!(winner("Show me employees"), "all_employees");
    // "by" is not a category name
    let found = engine.translate("Sales by category").matched().expect("match");
    assert_eq!(found.recognizer.name(), "category_revenue");
    assert_eq!(found.captures.get(1), None);
}

#[test]
fn builtin_table_is_ordered_and_unique() {
    let rules = RuleTable::builtin().unwrap();
    let names = rules.names();
    assert_eq!(names.len(), 23);
    assert_eq!(names.first(), Some(&"product_sales_on_date"));
    assert_eq!(names.last(), Some(&"recent_hires"));
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
    assert!(rules.iter().all(|r| !r.variants().is_empty()));
    assert!(rules.get("all_employees").expect("present").template().is_static());
    assert!(!rules.get("customer_purchases").expect("present").template().is_static());
}

#[test]
fn bad_recognizers_are_refused() {
    let err = Recognizer::new("unbalanced", "", &[r"sales\s+(of"], Template::Static("select 1")).unwrap_err();
    assert!(err.to_string().contains("unbalanced"));
    assert!(Recognizer::new("empty", "", &[], Template::Static("select 1")).is_err());
}
