use serde::{Deserialize, Serialize};

/// Singleton site contact settings, shown in the header/footer and
/// editable from the admin area. Stored as row 1 and replaced as a
/// whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub phone: String,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            phone: "+7 (900) 000-00-00".to_string(),
            address: None,
            company_name: None,
            company_description: None,
            telegram: None,
            whatsapp: None,
            instagram: None,
        }
    }
}
