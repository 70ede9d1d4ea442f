use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 影城連鎖品牌，順序即合併時的優先順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Cgv,
    Lotte,
    Megabox,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Cgv, Provider::Lotte, Provider::Megabox];

    /// Code carried in `Theater::type` for theaters of this chain.
    pub fn code(self) -> &'static str {
        match self {
            Provider::Cgv => "C",
            Provider::Lotte => "L",
            Provider::Megabox => "M",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Cgv => "CGV",
            Provider::Lotte => "Lotte Cinema",
            Provider::Megabox => "Megabox",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Provider::ALL.into_iter().find(|p| p.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    #[serde(rename = "type")]
    pub r#type: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub lat: f64,
}

impl Theater {
    pub fn provider(&self) -> Option<Provider> {
        Provider::from_code(&self.r#type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGroup {
    pub area: Area,
    #[serde(rename = "theaterList", default)]
    pub theater_list: Vec<Theater>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeGroup {
    #[serde(default)]
    pub list: Vec<AreaGroup>,
}

/// Theater codes of the three chains, as returned by the codes endpoint.
///
/// All three groups are required. The flattening accessors never touch the
/// held groups, so they can be called any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeResponse {
    pub cgv: CodeGroup,
    pub lotte: CodeGroup,
    pub megabox: CodeGroup,
}

impl CodeResponse {
    pub fn new(cgv: CodeGroup, lotte: CodeGroup, megabox: CodeGroup) -> Self {
        Self { cgv, lotte, megabox }
    }

    pub fn code_group(&self, provider: Provider) -> &CodeGroup {
        match provider {
            Provider::Cgv => &self.cgv,
            Provider::Lotte => &self.lotte,
            Provider::Megabox => &self.megabox,
        }
    }

    /// Area groups in provider order (CGV, Lotte, Megabox), each chain's
    /// own ordering kept as is.
    pub fn iter_area_groups(&self) -> impl Iterator<Item = &AreaGroup> + '_ {
        Provider::ALL
            .into_iter()
            .flat_map(move |provider| self.code_group(provider).list.iter())
    }

    pub fn iter_theaters(&self) -> impl Iterator<Item = &Theater> + '_ {
        self.iter_area_groups()
            .flat_map(|group| group.theater_list.iter())
    }

    pub fn to_area_group_list(&self) -> Vec<AreaGroup> {
        self.iter_area_groups().cloned().collect()
    }

    pub fn to_theater_list(&self) -> Vec<Theater> {
        self.iter_theaters().cloned().collect()
    }

    /// Theater codes are only unique within one chain.
    pub fn find_theater(&self, provider: Provider, code: &str) -> Option<&Theater> {
        self.code_group(provider)
            .list
            .iter()
            .flat_map(|group| group.theater_list.iter())
            .find(|theater| theater.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// 伺服器格式為 "yyyy.MM.dd"
    #[serde(default)]
    pub open_date: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub is_now: bool,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

impl Movie {
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.open_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y.%m.%d").ok())
    }
}

/// Result of one completed search. A new value replaces the previous one;
/// it is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchContentsUiModel {
    pub movies: Vec<Movie>,
    pub has_no_item: bool,
}

impl SearchContentsUiModel {
    pub fn new(movies: Vec<Movie>) -> Self {
        let has_no_item = movies.is_empty();
        Self { movies, has_no_item }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUiModel {
    pub theaters: Vec<Theater>,
}
