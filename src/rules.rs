//! The rule table: an ordered list of recognizers, each pairing one or more
//! regular-expression variants with a plan template.
//!
//! Order is priority. The matcher stops at the first variant that matches,
//! so narrow rules (a product *and* a date) sit in front of the broad ones
//! (any product) that would otherwise shadow them.

use regex::{Regex, RegexBuilder};

use crate::error::{Nl2SqlError, Result};
use crate::plan::{contains, months_back, number, text, year_month, Captures, Plan, Template};

#[derive(Debug)]
pub struct Recognizer {
    name: &'static str,
    description: &'static str,
    variants: Vec<Regex>,
    template: Template,
}

impl Recognizer {
    /// Compiles the variants case-insensitively, in the order given.
    pub fn new(
        name: &'static str,
        description: &'static str,
        patterns: &[&str],
        template: Template,
    ) -> Result<Self> {
        let mut variants = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| Nl2SqlError::Pattern { recognizer: name.to_string(), message: e.to_string() })?;
            variants.push(regex);
        }
        if variants.is_empty() {
            return Err(Nl2SqlError::Pattern {
                recognizer: name.to_string(),
                message: "a recognizer needs at least one pattern variant".to_string(),
            });
        }
        Ok(Self { name, description, variants, template })
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn description(&self) -> &'static str {
        self.description
    }
    pub fn variants(&self) -> &[Regex] {
        &self.variants
    }
    pub fn template(&self) -> &Template {
        &self.template
    }
    pub fn plan(&self, captures: &Captures) -> Plan {
        self.template.materialize(captures)
    }
}

#[derive(Debug, Default)]
pub struct RuleTable {
    recognizers: Vec<Recognizer>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self { recognizers: Vec::new() }
    }
    /// Appends at the lowest priority; existing recognizers keep their order.
    pub fn push(&mut self, recognizer: Recognizer) -> &mut Self {
        self.recognizers.push(recognizer);
        self
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Recognizer> {
        self.recognizers.iter()
    }
    pub fn get(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.name == name)
    }
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name).collect()
    }

    /// The recognizers for the reference sales/HR database.
    pub fn builtin() -> Result<Self> {
        let mut table = RuleTable::new();

        // ------------- dynamic product and customer queries -------------
        table.push(Recognizer::new(
            "product_sales_on_date",
            "Sales of specific product on specific date",
            &[
                r#"sales\s+(?:of\s+|for\s+)?(?:product\s+)?["']?(.+?)["']?\s+(?:on|in|during)\s+(\d{4}-\d{2}-\d{2})"#,
                r#"how\s+many\s+["']?(.+?)["']?\s+(?:were\s+)?sold\s+on\s+(\d{4}-\d{2}-\d{2})"#,
            ],
            Template::Generator(product_sales_on_date),
        )?);
        table.push(Recognizer::new(
            "product_sales_between_dates",
            "Sales of specific product between date range",
            &[
                r#"sales\s+(?:of\s+|for\s+)?(?:product\s+)?["']?(.+?)["']?\s+(?:between|from)\s+(\d{4}-\d{2}-\d{2})\s+(?:to|and)\s+(\d{4}-\d{2}-\d{2})"#,
            ],
            Template::Generator(product_sales_between_dates),
        )?);
        table.push(Recognizer::new(
            "category_revenue",
            "Revenue by product category",
            &[
                r"(?:sales|revenue)\s+(?:by|per)\s+(?:product\s+)?category",
                r#"revenue\s+(?:by|from|for)\s+["']?([^"']+?)["']?\s+(?:category|type)"#,
                r"sales\s+of\s+(\w+)\s+(?:category|products)",
            ],
            Template::Generator(category_revenue),
        )?);
        table.push(Recognizer::new(
            "customer_purchases",
            "Sales to specific customer",
            &[
                r#"sales\s+to\s+(?:customer\s+)?["']?(.+?)["']?\s*[?.!]*\s*$"#,
                r#"what\s+did\s+(?:customer\s+)?["']?(.+?)["']?\s+buy"#,
                r#"purchases\s+(?:by|from)\s+(?:customer\s+)?["']?(.+?)["']?\s*[?.!]*\s*$"#,
            ],
            Template::Generator(customer_purchases),
        )?);
        table.push(Recognizer::new(
            "product_sales_summary",
            "Sales summary for specific product",
            &[
                r#"sales\s+(?:of|for)\s+(?:product\s+)?["']?(.+?)["']?\s+in\s+((?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\s+\d{4})\s*[?.!]*\s*$"#,
                r#"sales\s+(?:of|for)\s+(?:product\s+)?["']?(.+?)["']?(?:\s+in\s+(\d{4}-\d{2}))?\s*[?.!]*\s*$"#,
                r#"how\s+many\s+["']?(.+?)["']?\s+(?:were\s+|have\s+been\s+)?sold"#,
            ],
            Template::Generator(product_sales_summary),
        )?);
        table.push(Recognizer::new(
            "products_in_price_range",
            "Products within price range",
            &[
                r"products?\s+(?:priced\s+)?(?:between|from)\s+\$?(\d+(?:\.\d+)?)\s+(?:to|and)\s+\$?(\d+(?:\.\d+)?)",
                r"products?\s+(?:that\s+)?cost(?:s|ing)?\s+(?:between|from)\s+\$?(\d+(?:\.\d+)?)\s+(?:to|and)\s+\$?(\d+(?:\.\d+)?)",
            ],
            Template::Generator(products_in_price_range),
        )?);
        table.push(Recognizer::new(
            "employees_above_salary",
            "Employees earning above specified amount",
            &[
                r"employees?\s+(?:with\s+)?(?:a\s+)?salar(?:y|ies)\s+(?:above|over|greater\s+than|more\s+than)\s+\$?(\d[\d,]*)",
                r"who\s+earns?\s+(?:more\s+than|over|above)\s+\$?(\d[\d,]*)",
            ],
            Template::Generator(employees_above_salary),
        )?);
        table.push(Recognizer::new(
            "department_employees",
            "Get employees in a specific department",
            &[
                r"employees\s+in\s+(?:the\s+)?(\w+)(?:\s+department)?",
                r"who\s+works\s+in\s+(?:the\s+)?(\w+)",
                r"show\s+(?:me\s+)?(?:the\s+)?(\w+)\s+department\s+employees",
            ],
            Template::Generator(department_employees),
        )?);

        // ------------- employee queries -------------
        table.push(Recognizer::new(
            "all_employees",
            "Get all employees with their department information",
            &[
                r"show\s+(?:me\s+)?(?:all\s+)?(?:the\s+)?employees\s*[?.!]*\s*$",
                r"list\s+(?:all\s+)?(?:the\s+)?employees\s*[?.!]*\s*$",
                r"get\s+(?:all\s+)?(?:the\s+)?employees\s*[?.!]*\s*$",
            ],
            Template::Static(
                "select e.employee_id, e.first_name, e.last_name, e.email,
                        d.department_name, e.position, e.salary, e.hire_date
                   from employees e
                   left join departments d on e.department_id = d.department_id
                  order by e.employee_id",
            ),
        )?);
        table.push(Recognizer::new(
            "top_paid_employees",
            "Get top 5 highest paid employees",
            &[
                r"highest\s+paid\s+employees?",
                r"top\s+(?:paid\s+)?employees?\s+by\s+salary",
                r"employees?\s+with\s+(?:the\s+)?highest\s+salar(?:y|ies)",
            ],
            Template::Static(
                "select e.first_name, e.last_name, e.position, e.salary, d.department_name
                   from employees e
                   join departments d on e.department_id = d.department_id
                  order by e.salary desc
                  limit 5",
            ),
        )?);
        table.push(Recognizer::new(
            "average_salary_by_department",
            "Average salary by department",
            &[
                r"average\s+salary\s+(?:by|per)\s+department",
                r"department\s+average\s+salaries",
                r"what\s+is\s+the\s+average\s+salary\s+(?:by\s+|per\s+)?department",
            ],
            Template::Static(
                "select d.department_name,
                        count(e.employee_id) as employee_count,
                        round(avg(e.salary), 2) as avg_salary,
                        min(e.salary) as min_salary,
                        max(e.salary) as max_salary
                   from departments d
                   left join employees e on d.department_id = e.department_id
                  group by d.department_name
                  order by avg_salary desc",
            ),
        )?);

        // ------------- sales queries -------------
        table.push(Recognizer::new(
            "monthly_sales",
            "Monthly sales breakdown",
            &[r"sales\s+by\s+month", r"monthly\s+(?:sales|revenue)", r"revenue\s+by\s+month"],
            Template::Static(
                "select strftime('%Y-%m', sale_date) as month,
                        count(*) as transactions,
                        sum(quantity) as units_sold,
                        round(sum(total_amount), 2) as revenue
                   from sales
                  group by month
                  order by month desc",
            ),
        )?);
        table.push(Recognizer::new(
            "total_sales",
            "Get total sales summary",
            &[
                r"total\s+sales",
                r"show\s+(?:me\s+)?(?:the\s+)?total\s+revenue",
                r"what\s+(?:is\s+|are\s+)?(?:the\s+)?total\s+(?:sales|revenue)",
            ],
            Template::Static(
                "select count(*) as total_transactions,
                        sum(quantity) as total_units_sold,
                        round(sum(total_amount), 2) as total_revenue
                   from sales",
            ),
        )?);
        table.push(Recognizer::new(
            "top_selling_products",
            "Top 10 best selling products",
            &[
                r"top\s+(?:selling\s+)?products",
                r"best[\s-]+selling\s+products",
                r"most\s+sold\s+products",
            ],
            Template::Static(
                "select p.product_name, p.category,
                        sum(s.quantity) as total_quantity_sold,
                        count(s.sale_id) as number_of_sales,
                        round(sum(s.total_amount), 2) as total_revenue
                   from products p
                   join sales s on p.product_id = s.product_id
                  group by p.product_id, p.product_name, p.category
                  order by total_quantity_sold desc
                  limit 10",
            ),
        )?);
        table.push(Recognizer::new(
            "sales_by_employee",
            "Sales performance by employee",
            &[
                r"sales\s+by\s+employees?",
                r"employee\s+sales\s+performance",
                r"who\s+sold\s+the\s+most",
            ],
            Template::Static(
                "select e.first_name || ' ' || e.last_name as employee_name,
                        e.position,
                        count(s.sale_id) as number_of_sales,
                        sum(s.quantity) as units_sold,
                        round(sum(s.total_amount), 2) as total_revenue
                   from employees e
                   join sales s on e.employee_id = s.employee_id
                  group by e.employee_id, e.first_name, e.last_name, e.position
                  order by total_revenue desc",
            ),
        )?);

        // ------------- product queries -------------
        table.push(Recognizer::new(
            "low_stock_products",
            "Products with low stock (less than 50 units)",
            &[
                r"products?\s+(?:with\s+)?low\s+stock",
                r"low\s+inventory",
                r"products?\s+running\s+out",
            ],
            Template::Static(
                "select product_name, category, stock_quantity, price
                   from products
                  where stock_quantity < 50
                  order by stock_quantity asc",
            ),
        )?);
        table.push(Recognizer::new(
            "product_categories",
            "Product summary by category",
            &[
                r"products?\s+by\s+category",
                r"product\s+categories",
                r"what\s+categories\s+(?:do\s+we\s+have|are\s+there)",
            ],
            Template::Static(
                "select category,
                        count(*) as product_count,
                        round(avg(price), 2) as avg_price,
                        sum(stock_quantity) as total_stock
                   from products
                  group by category
                  order by product_count desc",
            ),
        )?);

        // ------------- customer queries -------------
        table.push(Recognizer::new(
            "top_customers",
            "Top 10 customers by revenue",
            &[
                r"top\s+customers",
                r"best\s+customers",
                r"customers?\s+by\s+(?:revenue|sales|spending)",
            ],
            Template::Static(
                "select c.customer_name, c.city, c.country,
                        count(s.sale_id) as number_of_orders,
                        sum(s.quantity) as total_units,
                        round(sum(s.total_amount), 2) as total_spent
                   from customers c
                   join sales s on c.customer_id = s.customer_id
                  group by c.customer_id, c.customer_name, c.city, c.country
                  order by total_spent desc
                  limit 10",
            ),
        )?);
        table.push(Recognizer::new(
            "customers_by_country",
            "Customer distribution by country",
            &[
                r"customers?\s+by\s+country",
                r"where\s+(?:are\s+)?(?:our\s+)?customers?\s+(?:from|located)",
                r"customer\s+distribution",
            ],
            Template::Static(
                "select country,
                        count(*) as customer_count,
                        count(distinct city) as cities
                   from customers
                  group by country
                  order by customer_count desc",
            ),
        )?);

        // ------------- project queries -------------
        table.push(Recognizer::new(
            "active_projects",
            "Currently active projects",
            &[r"active\s+projects", r"current\s+projects", r"projects?\s+in\s+progress"],
            Template::Static(
                "select p.project_name, d.department_name,
                        p.start_date, p.end_date, p.budget, p.status
                   from projects p
                   join departments d on p.department_id = d.department_id
                  where p.status in ('In Progress', 'Active')
                  order by p.start_date",
            ),
        )?);
        table.push(Recognizer::new(
            "project_budget",
            "Project budget summary",
            &[
                r"project\s+budget\s+(?:usage|summary)",
                r"how\s+much\s+(?:have\s+we\s+)?spent\s+on\s+projects",
                r"total\s+project\s+budget",
            ],
            Template::Static(
                "select sum(budget) as total_budget,
                        count(*) as total_projects,
                        round(avg(budget), 2) as avg_budget,
                        max(budget) as max_budget,
                        min(budget) as min_budget
                   from projects",
            ),
        )?);

        // ------------- cross-cutting queries -------------
        table.push(Recognizer::new(
            "department_overview",
            "Comprehensive department overview",
            &[
                r"department\s+(?:performance|summary|overview)",
                r"how\s+(?:is|are)\s+(?:each\s+)?departments?\s+doing",
            ],
            Template::Static(
                "select d.department_name,
                        d.location,
                        count(distinct e.employee_id) as employee_count,
                        round(avg(e.salary), 2) as avg_salary,
                        count(distinct p.project_id) as active_projects,
                        coalesce(sum(p.budget), 0) as total_project_budget
                   from departments d
                   left join employees e on d.department_id = e.department_id
                   left join projects p on d.department_id = p.department_id
                        and p.status in ('Active', 'In Progress')
                  group by d.department_id, d.department_name, d.location
                  order by employee_count desc",
            ),
        )?);
        table.push(Recognizer::new(
            "recent_hires",
            "Recently hired employees",
            &[
                r"employees?\s+hired\s+(?:in\s+)?(?:the\s+)?(?:last\s+|past\s+)?(\d+)\s+(months?|years?)",
                r"recent\s+hires",
                r"new\s+employees",
            ],
            Template::Generator(recent_hires),
        )?);

        Ok(table)
    }
}

// ------------- generators -------------

fn product_sales_on_date(c: &Captures) -> Plan {
    Plan::new(
        "select p.product_name, s.sale_date, s.quantity, s.total_amount,
                c.customer_name, e.first_name || ' ' || e.last_name as sold_by
           from sales s
           join products p on s.product_id = p.product_id
           join customers c on s.customer_id = c.customer_id
           join employees e on s.employee_id = e.employee_id
          where lower(p.product_name) like lower(?1) escape '\\'
            and date(s.sale_date) = ?2
          order by s.sale_date",
    )
    .bind(contains(c, 1))
    .bind(text(c, 2))
}

fn product_sales_between_dates(c: &Captures) -> Plan {
    Plan::new(
        "select p.product_name, s.sale_date,
                sum(s.quantity) as total_quantity,
                sum(s.total_amount) as total_revenue,
                count(distinct s.customer_id) as unique_customers
           from sales s
           join products p on s.product_id = p.product_id
          where lower(p.product_name) like lower(?1) escape '\\'
            and s.sale_date between ?2 and ?3
          group by p.product_name, s.sale_date
          order by s.sale_date",
    )
    .bind(contains(c, 1))
    .bind(text(c, 2))
    .bind(text(c, 3))
}

/// Without a captured category every category is reported.
fn category_revenue(c: &Captures) -> Plan {
    Plan::new(
        "select p.category,
                count(distinct p.product_id) as products_in_category,
                sum(s.quantity) as units_sold,
                round(sum(s.total_amount), 2) as total_revenue
           from sales s
           join products p on s.product_id = p.product_id
          where lower(p.category) like lower(?1) escape '\\'
          group by p.category
          order by total_revenue desc",
    )
    .bind(contains(c, 1))
}

fn customer_purchases(c: &Captures) -> Plan {
    Plan::new(
        "select c.customer_name, p.product_name, s.sale_date,
                s.quantity, s.total_amount
           from sales s
           join customers c on s.customer_id = c.customer_id
           join products p on s.product_id = p.product_id
          where lower(c.customer_name) like lower(?1) escape '\\'
          order by s.sale_date desc",
    )
    .bind(contains(c, 1))
}

fn product_sales_summary(c: &Captures) -> Plan {
    // the variants only admit YYYY-MM and month names, both of which normalize
    let month = c.get(2).map(|period| year_month(period).unwrap_or_else(|| period.to_string()));
    let filter = if month.is_some() { "\n            and strftime('%Y-%m', s.sale_date) = ?2" } else { "" };
    let plan = Plan::new(format!(
        "select p.product_name,
                count(s.sale_id) as number_of_sales,
                sum(s.quantity) as total_quantity_sold,
                round(sum(s.total_amount), 2) as total_revenue,
                round(avg(s.total_amount), 2) as avg_sale_value
           from sales s
           join products p on s.product_id = p.product_id
          where lower(p.product_name) like lower(?1) escape '\\'{filter}
          group by p.product_name"
    ))
    .bind(contains(c, 1));
    match month {
        Some(month) => plan.bind(month),
        None => plan,
    }
}

fn products_in_price_range(c: &Captures) -> Plan {
    Plan::new(
        "select product_name, category, price, stock_quantity
           from products
          where price between ?1 and ?2
          order by price",
    )
    .bind(number(c, 1))
    .bind(number(c, 2))
}

fn employees_above_salary(c: &Captures) -> Plan {
    Plan::new(
        "select e.first_name, e.last_name, e.position,
                d.department_name, e.salary
           from employees e
           join departments d on e.department_id = d.department_id
          where e.salary > ?1
          order by e.salary desc",
    )
    .bind(number(c, 1))
}

fn department_employees(c: &Captures) -> Plan {
    Plan::new(
        "select e.employee_id, e.first_name, e.last_name, e.position, e.salary
           from employees e
           join departments d on e.department_id = d.department_id
          where lower(d.department_name) like lower(?1) escape '\\'
          order by e.salary desc",
    )
    .bind(contains(c, 1))
}

fn recent_hires(c: &Captures) -> Plan {
    Plan::new(
        "select e.first_name, e.last_name, e.position, d.department_name, e.hire_date
           from employees e
           join departments d on e.department_id = d.department_id
          where e.hire_date >= date('now', ?1)
          order by e.hire_date desc",
    )
    .bind(months_back(c.get(1), c.get(2), 12))
}
