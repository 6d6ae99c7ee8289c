use serde::Serialize;

/// Example questions offered when a query is not understood.
pub const SUGGESTIONS: &[&str] = &[
    "Show me all employees",
    "Who works in engineering?",
    "Show me the highest paid employees",
    "What is the average salary by department?",
    "What are the total sales?",
    "Show me monthly sales",
    "What are the top selling products?",
    "Show me sales by employee",
    "Sales of Furniture products",
    "Revenue from Electronics type",
    "Sales of Laptop Pro 15 on 2023-03-15",
    "Products priced between $50 and $500",
    "Employees with salary above $100000",
    "Sales to Acme Corp",
    "What did TechStart Inc buy?",
];

#[derive(Debug, Clone, Serialize)]
pub struct TestCategory {
    pub category: &'static str,
    pub queries: &'static [&'static str],
}

/// Grouped sample queries exercising every kind of recognizer.
pub const TEST_CASES: &[TestCategory] = &[
    TestCategory {
        category: "Dynamic Product Sales",
        queries: &[
            "Sales of Laptop Pro 15 on 2023-03-15",
            "Sales of Wireless Mouse between 2023-01-01 and 2023-03-31",
            "How many Office Chair were sold?",
            "Sales of USB-C Hub in 2023-02",
            "Show me sales of Monitor 27\" on 2023-05-01",
        ],
    },
    TestCategory {
        category: "Dynamic Customer Queries",
        queries: &[
            "Sales to Acme Corp",
            "What did TechStart Inc buy?",
            "Show purchases by Global Ventures",
            "Sales to Innovation Labs",
        ],
    },
    TestCategory {
        category: "Dynamic Price/Salary Queries",
        queries: &[
            "Products priced between $50 and $500",
            "Products costing between $20 and $100",
            "Employees with salary above $100000",
            "Who earns more than $90000?",
        ],
    },
    TestCategory {
        category: "Dynamic Category Queries",
        queries: &[
            "Revenue by Electronics category",
            "Sales of Furniture products",
            "Revenue from Electronics type",
        ],
    },
    TestCategory {
        category: "Standard Employee Queries",
        queries: &[
            "Show me all employees",
            "Who works in engineering?",
            "Show me the highest paid employees",
            "What is the average salary by department?",
        ],
    },
    TestCategory {
        category: "Standard Sales Queries",
        queries: &[
            "What are the total sales?",
            "Show me monthly sales",
            "What are the top selling products?",
            "Show me sales by employee",
        ],
    },
];
