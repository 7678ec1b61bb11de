use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // Data source configuration
    pub data_source_mode: DataSourceMode,
    pub data_file: Option<String>,
    pub dataset_url: Option<String>,
    pub output_directory: Option<String>,
    // Upper bound for rank validation (competition size)
    pub max_rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceMode {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "internet")]
    Internet,
    #[serde(rename = "both")]
    Both,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source_mode: DataSourceMode::Local,
            data_file: Some("Colleges.json".to_string()),
            dataset_url: Some("https://example.com/Colleges.json".to_string()),
            output_directory: Some("output".to_string()),
            max_rank: Some(200_000),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

/// One row of the cutoff dataset. The upstream JSON keeps the column headers
/// of the published cutoff sheet, embedded spaces included, so every field
/// carries the exact header it deserializes from.
///
/// A row is not a whole institution: the same INSTCODE/name pair can appear
/// on several rows. Cutoff columns hold the last admitted rank of the prior
/// cycle for one category/gender segment, or null when that segment admitted
/// nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    #[serde(rename = "INSTCODE")]
    pub inst_code: String,
    #[serde(rename = "NAME OF THE INSTITUTION")]
    pub name: String,
    #[serde(rename = "PLACE")]
    pub place: String,
    #[serde(rename = "COED")]
    pub coed: AdmissionType,
    #[serde(rename = "ESTD")]
    pub estd: u32,
    #[serde(rename = "OC_BO YS")]
    pub oc_boys: Option<u32>,
    #[serde(rename = "OC_GIR LS")]
    pub oc_girls: Option<u32>,
    #[serde(rename = "SC_BO YS")]
    pub sc_boys: Option<u32>,
    #[serde(rename = "SC_GIR LS")]
    pub sc_girls: Option<u32>,
    #[serde(rename = "ST_BOY S")]
    pub st_boys: Option<u32>,
    #[serde(rename = "ST_GIR LS")]
    pub st_girls: Option<u32>,
    #[serde(rename = "BCA_B OYS")]
    pub bca_boys: Option<u32>,
    #[serde(rename = "BCA_GI RLS")]
    pub bca_girls: Option<u32>,
    #[serde(rename = "BCB_B OYS")]
    pub bcb_boys: Option<u32>,
    #[serde(rename = "BCB_GI RLS")]
    pub bcb_girls: Option<u32>,
    #[serde(rename = "BCC_B OYS")]
    pub bcc_boys: Option<u32>,
    #[serde(rename = "BCC_GI RLS")]
    pub bcc_girls: Option<u32>,
    #[serde(rename = "BCD_B OYS")]
    pub bcd_boys: Option<u32>,
    #[serde(rename = "BCD_GI RLS")]
    pub bcd_girls: Option<u32>,
    #[serde(rename = "BCE_B OYS")]
    pub bce_boys: Option<u32>,
    #[serde(rename = "BCE_GI RLS")]
    pub bce_girls: Option<u32>,
    #[serde(rename = "OC_EWS_B OYS")]
    pub oc_ews_boys: Option<u32>,
    #[serde(rename = "OC_EWS_G IRLS")]
    pub oc_ews_girls: Option<u32>,
    #[serde(rename = "COLLFE E")]
    pub fee: Option<f64>,
}

impl InstitutionRecord {
    /// Resolve the cutoff column for a category/gender segment. Total over
    /// the 9x2 grid; each pair reads exactly one column.
    pub fn cutoff_rank(&self, category: Category, gender: Gender) -> Option<u32> {
        match (category, gender) {
            (Category::Oc, Gender::Boys) => self.oc_boys,
            (Category::Oc, Gender::Girls) => self.oc_girls,
            (Category::Sc, Gender::Boys) => self.sc_boys,
            (Category::Sc, Gender::Girls) => self.sc_girls,
            (Category::St, Gender::Boys) => self.st_boys,
            (Category::St, Gender::Girls) => self.st_girls,
            (Category::Bca, Gender::Boys) => self.bca_boys,
            (Category::Bca, Gender::Girls) => self.bca_girls,
            (Category::Bcb, Gender::Boys) => self.bcb_boys,
            (Category::Bcb, Gender::Girls) => self.bcb_girls,
            (Category::Bcc, Gender::Boys) => self.bcc_boys,
            (Category::Bcc, Gender::Girls) => self.bcc_girls,
            (Category::Bcd, Gender::Boys) => self.bcd_boys,
            (Category::Bcd, Gender::Girls) => self.bcd_girls,
            (Category::Bce, Gender::Boys) => self.bce_boys,
            (Category::Bce, Gender::Girls) => self.bce_girls,
            (Category::OcEws, Gender::Boys) => self.oc_ews_boys,
            (Category::OcEws, Gender::Girls) => self.oc_ews_girls,
        }
    }
}

/// Reservation categories of the admission process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Oc,
    Sc,
    St,
    Bca,
    Bcb,
    Bcc,
    Bcd,
    Bce,
    OcEws,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Oc,
        Category::Sc,
        Category::St,
        Category::Bca,
        Category::Bcb,
        Category::Bcc,
        Category::Bcd,
        Category::Bce,
        Category::OcEws,
    ];

    pub fn parse(label: &str) -> Option<Self> {
        match label.to_uppercase().replace('-', "_").as_str() {
            "OC" => Some(Category::Oc),
            "SC" => Some(Category::Sc),
            "ST" => Some(Category::St),
            "BCA" => Some(Category::Bca),
            "BCB" => Some(Category::Bcb),
            "BCC" => Some(Category::Bcc),
            "BCD" => Some(Category::Bcd),
            "BCE" => Some(Category::Bce),
            "OC_EWS" => Some(Category::OcEws),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Oc => "OC",
            Category::Sc => "SC",
            Category::St => "ST",
            Category::Bca => "BCA",
            Category::Bcb => "BCB",
            Category::Bcc => "BCC",
            Category::Bcd => "BCD",
            Category::Bce => "BCE",
            Category::OcEws => "OC_EWS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Boys,
    Girls,
}

impl Gender {
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "BOYS" => Some(Gender::Boys),
            "GIRLS" => Some(Gender::Girls),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Boys => "BOYS",
            Gender::Girls => "GIRLS",
        }
    }
}

/// Admission type tag carried by each dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionType {
    #[serde(rename = "COED")]
    Coed,
    #[serde(rename = "BOYS")]
    Boys,
    #[serde(rename = "GIRLS")]
    Girls,
}

impl AdmissionType {
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "COED" => Some(AdmissionType::Coed),
            "BOYS" => Some(AdmissionType::Boys),
            "GIRLS" => Some(AdmissionType::Girls),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdmissionType::Coed => "COED",
            AdmissionType::Boys => "BOYS",
            AdmissionType::Girls => "GIRLS",
        }
    }
}

/// A search query. `max_fee` and `coed` are optional narrowing filters;
/// `coed == None` means all college types.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub rank: u32,
    pub category: Category,
    pub gender: Gender,
    pub max_fee: Option<f64>,
    pub coed: Option<AdmissionType>,
}

/// One logical institution that survived the filters: the row picked as its
/// representative, the cutoff resolved for the queried segment, and whether
/// the queried rank makes the cut.
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeResult {
    pub college: InstitutionRecord,
    pub cutoff_rank: Option<u32>,
    pub eligible: bool,
}
