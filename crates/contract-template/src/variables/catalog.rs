//! Static catalog of the placeholders a contract template can reference

use super::{Category, VariableDescriptor};

const fn var(path: &'static str, display_label: &'static str, category: Category) -> VariableDescriptor {
    VariableDescriptor {
        path,
        display_label,
        category,
    }
}

/// Every known placeholder, in the order the authoring panel lists them
static CATALOG: &[VariableDescriptor] = &[
    // Landlord
    var("landlord.name", "Nome do locador", Category::Landlord),
    var("landlord.cpfCnpj", "CPF/CNPJ do locador", Category::Landlord),
    var("landlord.rg", "RG do locador", Category::Landlord),
    var("landlord.nationality", "Nacionalidade do locador", Category::Landlord),
    var("landlord.maritalStatus", "Estado civil do locador", Category::Landlord),
    var("landlord.profession", "Profissão do locador", Category::Landlord),
    var("landlord.email", "E-mail do locador", Category::Landlord),
    var("landlord.phone", "Telefone do locador", Category::Landlord),
    var("landlord.address", "Endereço do locador", Category::Landlord),
    // Tenant
    var("tenant.name", "Nome do locatário", Category::Tenant),
    var("tenant.cpfCnpj", "CPF/CNPJ do locatário", Category::Tenant),
    var("tenant.rg", "RG do locatário", Category::Tenant),
    var("tenant.nationality", "Nacionalidade do locatário", Category::Tenant),
    var("tenant.maritalStatus", "Estado civil do locatário", Category::Tenant),
    var("tenant.profession", "Profissão do locatário", Category::Tenant),
    var("tenant.email", "E-mail do locatário", Category::Tenant),
    var("tenant.phone", "Telefone do locatário", Category::Tenant),
    // Property
    var("property.title", "Título do imóvel", Category::Property),
    var("property.type", "Tipo do imóvel", Category::Property),
    var("property.street", "Logradouro", Category::Property),
    var("property.number", "Número", Category::Property),
    var("property.complement", "Complemento", Category::Property),
    var("property.district", "Bairro", Category::Property),
    var("property.city", "Cidade", Category::Property),
    var("property.state", "Estado", Category::Property),
    var("property.zipCode", "CEP", Category::Property),
    var("property.fullAddress", "Endereço completo do imóvel", Category::Property),
    // Monetary
    var("rentAmount", "Valor do aluguel", Category::Monetary),
    var("condoFee", "Valor do condomínio", Category::Monetary),
    var("iptuAmount", "Valor do IPTU", Category::Monetary),
    var("securityDeposit", "Valor da caução", Category::Monetary),
    var("lateFeePercentage", "Multa por atraso (%)", Category::Monetary),
    // Dates and terms
    var("startDate", "Data de início", Category::DatesAndTerms),
    var("endDate", "Data de término", Category::DatesAndTerms),
    var("durationInMonths", "Duração (meses)", Category::DatesAndTerms),
    var("paymentDueDay", "Dia de vencimento", Category::DatesAndTerms),
    var("todayDate", "Data de hoje", Category::DatesAndTerms),
];

/// List all known placeholders in declaration order
pub fn list_variables() -> &'static [VariableDescriptor] {
    CATALOG
}

/// Look up a catalog entry by path
pub fn find_variable(path: &str) -> Option<&'static VariableDescriptor> {
    CATALOG.iter().find(|descriptor| descriptor.path == path)
}
