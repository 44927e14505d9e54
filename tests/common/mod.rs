#![allow(dead_code)]

use std::io::Write;
use std::process::ExitCode;

use valuator::adapters::file_config_adapter::FileConfigAdapter;
use valuator::domain::earnings::Mode;
use valuator::domain::engine::ValuationRequest;
use valuator::domain::sheet::{FinancialInputs, OwnerAddBacks};
use valuator::domain::valuation::ValuationBase;

pub const EBITDA_INI: &str = r#"
[valuation]
mode = ebitda
base = metric

[session]
name = Jane Doe
email = jane@example.com

[inputs]
net_sales = $200,000
cogs = 60,000
employee_cost = 70,000
other_operating_cost = 20,000
"#;

pub const SDE_INI: &str = r#"
[valuation]
mode = sde
base = metric_plus_addbacks

[inputs]
income = $300,000
purchases = 90,000
labor = 100,000
operating_expenses = 50,000

[addbacks]
owner_salary = 1,000
payroll_taxes = 1,000
health_insurance = 1,000
auto_expense = 1,000
depreciation = 1,000
one_time_expenses = (500)
"#;

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn config(content: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(content).unwrap()
}

pub fn is_success(code: ExitCode) -> bool {
    format!("{:?}", code) == format!("{:?}", ExitCode::SUCCESS)
}

pub fn exit_code_is(code: ExitCode, expected: u8) -> bool {
    format!("{:?}", code) == format!("{:?}", ExitCode::from(expected))
}

pub fn ebitda_request(net_sales: f64, cogs: f64, employee: f64, other: f64) -> ValuationRequest {
    let inputs = FinancialInputs::from_raw([
        ("net_sales", net_sales),
        ("cogs", cogs),
        ("employee_cost", employee),
        ("other_operating_cost", other),
    ]);
    ValuationRequest::new(
        Mode::Ebitda,
        inputs,
        OwnerAddBacks::new(),
        ValuationBase::Metric,
    )
}
