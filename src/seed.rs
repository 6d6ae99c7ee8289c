//! Schema provisioning and the reference dataset: a small company with
//! departments, staff, products, customers, sales and projects.

use tracing::info;

use crate::error::Result;
use crate::persist::Storage;

// The "STRICT" keyword is left out so that DECIMAL columns keep their numeric affinity
const TABLES: &str = "
    create table if not exists employees (
        employee_id integer primary key autoincrement,
        first_name text not null,
        last_name text not null,
        email text unique,
        department_id integer,
        position text,
        salary decimal(10,2),
        hire_date date,
        manager_id integer,
        foreign key (department_id) references departments(department_id),
        foreign key (manager_id) references employees(employee_id)
    );
    create table if not exists departments (
        department_id integer primary key autoincrement,
        department_name text not null,
        location text,
        budget decimal(12,2)
    );
    create table if not exists products (
        product_id integer primary key autoincrement,
        product_name text not null,
        category text,
        price decimal(10,2),
        stock_quantity integer,
        supplier_id integer,
        foreign key (supplier_id) references suppliers(supplier_id)
    );
    create table if not exists sales (
        sale_id integer primary key autoincrement,
        product_id integer,
        employee_id integer,
        customer_id integer,
        sale_date date,
        quantity integer,
        total_amount decimal(10,2),
        foreign key (product_id) references products(product_id),
        foreign key (employee_id) references employees(employee_id),
        foreign key (customer_id) references customers(customer_id)
    );
    create table if not exists customers (
        customer_id integer primary key autoincrement,
        customer_name text not null,
        email text,
        phone text,
        city text,
        country text,
        registration_date date
    );
    create table if not exists suppliers (
        supplier_id integer primary key autoincrement,
        supplier_name text not null,
        contact_name text,
        phone text,
        city text,
        country text
    );
    create table if not exists projects (
        project_id integer primary key autoincrement,
        project_name text not null,
        department_id integer,
        start_date date,
        end_date date,
        budget decimal(12,2),
        status text,
        foreign key (department_id) references departments(department_id)
    );
    create table if not exists employee_projects (
        employee_id integer,
        project_id integer,
        role text,
        hours_allocated integer,
        primary key (employee_id, project_id),
        foreign key (employee_id) references employees(employee_id),
        foreign key (project_id) references projects(project_id)
    );
";

const CLEAR: &str = "
    delete from employee_projects;
    delete from sales;
    delete from projects;
    delete from employees;
    delete from products;
    delete from customers;
    delete from suppliers;
    delete from departments;
";

const DATA: &str = "
    insert into departments (department_id, department_name, location, budget) values
        (1, 'Engineering', 'San Francisco', 2500000),
        (2, 'Sales', 'New York', 1500000),
        (3, 'Marketing', 'Los Angeles', 1000000),
        (4, 'HR', 'Chicago', 800000),
        (5, 'Finance', 'Boston', 1200000);

    insert into employees (employee_id, first_name, last_name, email, department_id, position, salary, hire_date, manager_id) values
        (1, 'John', 'Smith', 'john.smith@company.com', 1, 'Senior Engineer', 120000, '2020-01-15', null),
        (2, 'Jane', 'Doe', 'jane.doe@company.com', 1, 'Software Engineer', 95000, '2021-03-20', 1),
        (3, 'Mike', 'Johnson', 'mike.johnson@company.com', 2, 'Sales Manager', 110000, '2019-07-10', null),
        (4, 'Sarah', 'Williams', 'sarah.williams@company.com', 2, 'Sales Rep', 75000, '2021-11-05', 3),
        (5, 'Robert', 'Brown', 'robert.brown@company.com', 3, 'Marketing Director', 130000, '2018-05-12', null),
        (6, 'Emily', 'Davis', 'emily.davis@company.com', 3, 'Marketing Specialist', 65000, '2022-02-28', 5),
        (7, 'David', 'Miller', 'david.miller@company.com', 4, 'HR Manager', 90000, '2020-09-15', null),
        (8, 'Lisa', 'Wilson', 'lisa.wilson@company.com', 5, 'Finance Director', 140000, '2017-03-22', null),
        (9, 'Tom', 'Anderson', 'tom.anderson@company.com', 1, 'Junior Developer', 70000, '2022-06-01', 2),
        (10, 'Anna', 'Martinez', 'anna.martinez@company.com', 2, 'Sales Rep', 72000, '2021-08-17', 3);

    insert into suppliers (supplier_id, supplier_name, contact_name, phone, city, country) values
        (1, 'Tech Supplies Inc', 'James Wilson', '555-0101', 'Seattle', 'USA'),
        (2, 'Office World', 'Mary Johnson', '555-0102', 'Portland', 'USA'),
        (3, 'Global Electronics', 'Chen Wei', '555-0103', 'Shanghai', 'China'),
        (4, 'Premium Parts Co', 'Hans Mueller', '555-0104', 'Berlin', 'Germany');

    insert into products (product_id, product_name, category, price, stock_quantity, supplier_id) values
        (1, 'Laptop Pro 15', 'Electronics', 1299.99, 50, 1),
        (2, 'Wireless Mouse', 'Electronics', 29.99, 200, 1),
        (3, 'Office Chair', 'Furniture', 299.99, 75, 2),
        (4, 'Standing Desk', 'Furniture', 599.99, 30, 2),
        (5, 'USB-C Hub', 'Electronics', 49.99, 150, 3),
        (6, 'Monitor 27\"', 'Electronics', 399.99, 60, 3),
        (7, 'Keyboard Mechanical', 'Electronics', 129.99, 100, 1),
        (8, 'Webcam HD', 'Electronics', 79.99, 80, 3),
        (9, 'Desk Lamp', 'Furniture', 39.99, 120, 2),
        (10, 'Cable Set', 'Electronics', 19.99, 300, 4);

    insert into customers (customer_id, customer_name, email, phone, city, country, registration_date) values
        (1, 'Acme Corp', 'contact@acme.com', '555-1001', 'New York', 'USA', '2020-01-10'),
        (2, 'TechStart Inc', 'info@techstart.com', '555-1002', 'Austin', 'USA', '2020-03-15'),
        (3, 'Global Ventures', 'sales@globalv.com', '555-1003', 'London', 'UK', '2020-06-20'),
        (4, 'Innovation Labs', 'hello@innovlabs.com', '555-1004', 'Toronto', 'Canada', '2021-01-05'),
        (5, 'Digital Solutions', 'contact@digisol.com', '555-1005', 'Sydney', 'Australia', '2021-04-12'),
        (6, 'Future Systems', 'info@futuresys.com', '555-1006', 'Tokyo', 'Japan', '2021-07-18'),
        (7, 'Smart Tech Co', 'sales@smarttech.com', '555-1007', 'Seoul', 'South Korea', '2021-10-22'),
        (8, 'Data Dynamics', 'hello@datadyn.com', '555-1008', 'Mumbai', 'India', '2022-02-14'),
        (9, 'Cloud Nine Inc', 'contact@cloudnine.com', '555-1009', 'Singapore', 'Singapore', '2022-05-30'),
        (10, 'Quantum Corp', 'info@quantum.com', '555-1010', 'Berlin', 'Germany', '2022-08-25');

    insert into sales (product_id, employee_id, customer_id, sale_date, quantity, total_amount) values
        (1, 3, 1, '2023-01-15', 5, 6499.95),
        (2, 4, 2, '2023-01-20', 10, 299.90),
        (3, 3, 3, '2023-02-05', 3, 899.97),
        (4, 4, 4, '2023-02-10', 2, 1199.98),
        (5, 10, 5, '2023-02-15', 20, 999.80),
        (6, 3, 6, '2023-03-01', 4, 1599.96),
        (7, 4, 7, '2023-03-10', 8, 1039.92),
        (8, 10, 8, '2023-03-15', 6, 479.94),
        (1, 3, 6, '2023-03-15', 1, 1299.99),
        (1, 3, 9, '2023-04-01', 3, 3899.97),
        (2, 4, 10, '2023-04-05', 15, 449.85),
        (9, 10, 1, '2023-04-10', 10, 399.90),
        (10, 3, 2, '2023-04-15', 25, 499.75),
        (6, 4, 3, '2023-05-01', 5, 1999.95),
        (1, 10, 4, '2023-05-10', 2, 2599.98),
        (3, 3, 5, '2023-05-15', 4, 1199.96);

    insert into projects (project_id, project_name, department_id, start_date, end_date, budget, status) values
        (1, 'Website Redesign', 1, '2023-01-01', '2023-06-30', 150000, 'In Progress'),
        (2, 'Sales CRM Implementation', 2, '2023-02-01', '2023-08-31', 200000, 'In Progress'),
        (3, 'Marketing Campaign Q2', 3, '2023-04-01', '2023-06-30', 75000, 'Planning'),
        (4, 'Employee Training Program', 4, '2023-03-01', '2023-12-31', 50000, 'Active'),
        (5, 'Financial System Upgrade', 5, '2023-01-15', '2023-07-15', 180000, 'In Progress');

    insert into employee_projects (employee_id, project_id, role, hours_allocated) values
        (1, 1, 'Project Lead', 300),
        (2, 1, 'Developer', 400),
        (9, 1, 'Developer', 350),
        (3, 2, 'Project Manager', 200),
        (4, 2, 'Analyst', 300),
        (10, 2, 'Analyst', 250),
        (5, 3, 'Project Lead', 150),
        (6, 3, 'Coordinator', 200),
        (7, 4, 'Project Manager', 100),
        (8, 5, 'Project Lead', 250);
";

/// Table names created by [`provision`], sorted.
pub const TABLE_NAMES: &[&str] = &[
    "customers",
    "departments",
    "employee_projects",
    "employees",
    "products",
    "projects",
    "sales",
    "suppliers",
];

/// Creates the tables if needed and replaces their contents with the reference dataset.
pub fn provision(storage: &dyn Storage) -> Result<()> {
    storage.run_statement(TABLES)?;
    storage.run_statement(CLEAR)?;
    storage.run_statement(DATA)?;
    info!(tables = TABLE_NAMES.len(), "reference dataset loaded");
    Ok(())
}
