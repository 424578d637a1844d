//! Building a [`TemplateDataContext`] from typed contract records
//!
//! The resolver only substitutes text, so money and dates are formatted here
//! (pt-BR conventions) before they reach the context.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::context::{ContextValue, TemplateDataContext};

/// Landlord or tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartyInfo {
    pub name: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub rg: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<String>,
    pub profession: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// The rented property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyInfo {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl PropertyInfo {
    /// "Rua X, 10, Apto 2 - Bairro, Cidade/UF, CEP 00000-000" from the parts present
    pub fn full_address(&self) -> Option<String> {
        let street: Vec<&str> = [&self.street, &self.number, &self.complement]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
        let city = match (&self.city, &self.state) {
            (Some(city), Some(state)) => Some(format!("{city}/{state}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(state)) => Some(state.clone()),
            (None, None) => None,
        };

        let mut parts = Vec::new();
        if !street.is_empty() {
            parts.push(street.join(", "));
        }
        if let Some(district) = &self.district {
            parts.push(district.clone());
        }
        if let Some(city) = city {
            parts.push(city);
        }
        if let Some(zip) = &self.zip_code {
            parts.push(format!("CEP {zip}"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" - "))
        }
    }
}

/// Numeric and date terms of the contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractTerms {
    pub rent_amount: Option<f64>,
    pub condo_fee: Option<f64>,
    pub iptu_amount: Option<f64>,
    pub security_deposit: Option<f64>,
    pub late_fee_percentage: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_due_day: Option<u32>,
}

/// A contract as returned by the data-fetch collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRecord {
    pub landlord: Option<PartyInfo>,
    pub tenant: Option<PartyInfo>,
    pub property: Option<PropertyInfo>,
    #[serde(flatten)]
    pub terms: ContractTerms,
}

/// Assembles a context with every numeric and date field pre-formatted
#[derive(Debug, Clone)]
pub struct ContractContextBuilder {
    record: ContractRecord,
    today: NaiveDate,
}

impl ContractContextBuilder {
    /// Builder dated with the local current date
    pub fn new(record: ContractRecord) -> Self {
        Self::dated(record, Local::now().date_naive())
    }

    /// Builder with an explicit "today"
    pub fn dated(record: ContractRecord, today: NaiveDate) -> Self {
        Self { record, today }
    }

    pub fn build(&self) -> TemplateDataContext {
        let mut context = TemplateDataContext::new();

        if let Some(landlord) = &self.record.landlord {
            context.insert("landlord", party_value(landlord));
        }
        if let Some(tenant) = &self.record.tenant {
            context.insert("tenant", party_value(tenant));
        }
        if let Some(property) = &self.record.property {
            context.insert("property", property_value(property));
        }

        let terms = &self.record.terms;
        let money = [
            ("rentAmount", terms.rent_amount),
            ("condoFee", terms.condo_fee),
            ("iptuAmount", terms.iptu_amount),
            ("securityDeposit", terms.security_deposit),
        ];
        for (key, amount) in money {
            if let Some(amount) = amount {
                context.insert(key, ContextValue::Text(format_brl(amount)));
            }
        }
        if let Some(percentage) = terms.late_fee_percentage {
            context.insert("lateFeePercentage", ContextValue::Text(format_percentage(percentage)));
        }
        if let Some(start) = terms.start_date {
            context.insert("startDate", ContextValue::Text(format_date(start)));
        }
        if let Some(end) = terms.end_date {
            context.insert("endDate", ContextValue::Text(format_date(end)));
        }
        if let (Some(start), Some(end)) = (terms.start_date, terms.end_date) {
            context.insert(
                "durationInMonths",
                ContextValue::Text(months_between(start, end).to_string()),
            );
        }
        if let Some(day) = terms.payment_due_day {
            context.insert("paymentDueDay", ContextValue::Text(day.to_string()));
        }
        context.insert("todayDate", ContextValue::Text(format_date(self.today)));

        context
    }
}

fn insert_text(entries: &mut Vec<(&'static str, ContextValue)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        entries.push((key, ContextValue::text(value.clone())));
    }
}

fn party_value(party: &PartyInfo) -> ContextValue {
    let mut entries = Vec::new();
    insert_text(&mut entries, "name", &party.name);
    insert_text(&mut entries, "cpfCnpj", &party.cpf_cnpj);
    insert_text(&mut entries, "rg", &party.rg);
    insert_text(&mut entries, "nationality", &party.nationality);
    insert_text(&mut entries, "maritalStatus", &party.marital_status);
    insert_text(&mut entries, "profession", &party.profession);
    insert_text(&mut entries, "email", &party.email);
    insert_text(&mut entries, "phone", &party.phone);
    insert_text(&mut entries, "address", &party.address);
    ContextValue::nested(entries)
}

fn property_value(property: &PropertyInfo) -> ContextValue {
    let mut entries = Vec::new();
    insert_text(&mut entries, "title", &property.title);
    insert_text(&mut entries, "type", &property.property_type);
    insert_text(&mut entries, "street", &property.street);
    insert_text(&mut entries, "number", &property.number);
    insert_text(&mut entries, "complement", &property.complement);
    insert_text(&mut entries, "district", &property.district);
    insert_text(&mut entries, "city", &property.city);
    insert_text(&mut entries, "state", &property.state);
    insert_text(&mut entries, "zipCode", &property.zip_code);
    insert_text(&mut entries, "fullAddress", &property.full_address());
    ContextValue::nested(entries)
}

/// Format an amount as Brazilian reais: `R$ 1.234,56`
pub fn format_brl(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{sign}R$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `10` → `10%`, `2.5` → `2,5%`
fn format_percentage(value: f64) -> String {
    let text = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}").replace('.', ",")
    };
    format!("{text}%")
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Whole months from `start` to `end`; zero when `end` is not after `start`
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}
