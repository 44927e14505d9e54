//! Field catalogs: the labelled inputs each valuation mode reads.

/// A named input field with its display label and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl Category {
    pub fn new(key: &str, label: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    /// Category for a key with no catalog entry; the label is derived from the key.
    pub fn from_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: humanize_key(key),
            description: String::new(),
        }
    }
}

/// `"one_time_expenses"` -> `"One Time Expenses"`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ebitda_fields() -> Vec<Category> {
    vec![
        Category::new("net_sales", "Net Sales", "Total sales net of discounts and comps."),
        Category::new(
            "cogs",
            "Cost of Goods Sold (COGS)",
            "Food and beverage purchases consumed in the period.",
        ),
        Category::new(
            "employee_cost",
            "Employee Cost",
            "Wages, payroll taxes and benefits for all staff.",
        ),
        Category::new(
            "other_operating_cost",
            "Other Operating Cost",
            "Rent, utilities, repairs, marketing and other operating costs.",
        ),
    ]
}

pub fn sde_fields() -> Vec<Category> {
    vec![
        Category::new("income", "Income", "Gross income from all sales."),
        Category::new("purchases", "Purchases", "Food, beverage and supply purchases."),
        Category::new("labor", "Labor", "Payroll for all non-owner staff."),
        Category::new(
            "operating_expenses",
            "Operating Expenses",
            "Rent, utilities, insurance and other operating expenses.",
        ),
    ]
}

/// Default discretionary expenses added back to earnings.
pub fn default_addbacks() -> Vec<Category> {
    vec![
        Category::new(
            "owner_salary",
            "Owner's Salary",
            "Compensation paid to the working owner.",
        ),
        Category::new(
            "payroll_taxes",
            "Payroll Taxes",
            "Payroll taxes on the owner's salary.",
        ),
        Category::new(
            "health_insurance",
            "Health Insurance",
            "Owner health insurance paid by the business.",
        ),
        Category::new(
            "auto_expense",
            "Auto Expense",
            "Owner vehicle costs run through the business.",
        ),
        Category::new("depreciation", "Depreciation", "Non-cash depreciation expense."),
        Category::new("interest", "Interest", "Interest on business debt."),
        Category::new(
            "one_time_expenses",
            "One-Time Expenses",
            "Non-recurring expenses such as a one-off repair or legal fee.",
        ),
    ]
}

/// Category from a config entry `key = Label | description`.
///
/// The description is optional; an empty label falls back to the humanized key.
pub fn parse_category(key: &str, value: &str) -> Category {
    let (label, description) = match value.split_once('|') {
        Some((label, description)) => (label.trim(), description.trim()),
        None => (value.trim(), ""),
    };
    if label.is_empty() {
        Category {
            description: description.to_string(),
            ..Category::from_key(key)
        }
    } else {
        Category::new(key, label, description)
    }
}

/// Overlay `extra` on `base`: matching keys are replaced in place, new keys
/// are appended.
pub fn merge_catalog(mut base: Vec<Category>, extra: Vec<Category>) -> Vec<Category> {
    for category in extra {
        match base.iter_mut().find(|c| c.key == category.key) {
            Some(existing) => *existing = category,
            None => base.push(category),
        }
    }
    base
}

/// Find the catalog entry for `key`, or derive one from the key.
pub fn category_for(catalog: &[Category], key: &str) -> Category {
    catalog
        .iter()
        .find(|c| c.key == key)
        .cloned()
        .unwrap_or_else(|| Category::from_key(key))
}

/// Resolve the label for `key`, falling back to a humanized key.
pub fn label_for(catalog: &[Category], key: &str) -> String {
    catalog
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| humanize_key(key))
}
