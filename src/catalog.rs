//! Fixed vocabulary of the Vitibrasil portal.
//!
//! Every category the portal exposes, with its `opcao` code, the years it has
//! data for, its `subopcao` vocabulary and the shape of its data table. The
//! slice order is the declaration order: the first sub-option of a category is
//! its default.

/// Year requested when the caller does not pass one.
pub const DEFAULT_YEAR: &str = "2023";

/// Inclusive range of years a category has data for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YearRange {
    pub first: i64,
    pub last: i64,
}

impl YearRange {
    pub fn contains(self, year: i64) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

const UNTIL_2023: YearRange = YearRange { first: 1970, last: 2023 };
const UNTIL_2024: YearRange = YearRange { first: 1970, last: 2024 };

/// How rows are laid out in a category's data table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableLayout {
    /// Product rows (`tb_item`) each followed by their breakdown (`tb_subitem`).
    Categorized,
    /// One row per country: name, quantity, value.
    Trade,
}

/// A `subopcao` accepted by a category.
#[derive(Debug, Eq, PartialEq)]
pub struct SubOption {
    pub key: &'static str,
    pub code: &'static str,
}

/// One `opcao` of the portal.
#[derive(Debug, Eq, PartialEq)]
pub struct Category {
    pub key: &'static str,
    pub code: &'static str,
    pub years: YearRange,
    /// Empty when the category takes no `subopcao`.
    pub sub_options: &'static [SubOption],
    pub layout: TableLayout,
}

impl Category {
    /// Looks a category up by its public key (e.g. `"producao"`).
    pub fn lookup(key: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.key == key)
    }

    pub fn sub_option(&self, key: &str) -> Option<&'static SubOption> {
        self.sub_options.iter().find(|s| s.key == key)
    }

    /// First declared sub-option, used when the caller omits one.
    pub fn default_sub_option(&self) -> Option<&'static SubOption> {
        self.sub_options.first()
    }

    pub fn sub_option_keys(&self) -> Vec<&'static str> {
        self.sub_options.iter().map(|s| s.key).collect()
    }
}

/// All category keys, in declaration order.
pub fn option_keys() -> Vec<&'static str> {
    CATEGORIES.iter().map(|c| c.key).collect()
}

macro_rules! sub_options {
    ($($key:literal => $code:literal),* $(,)?) => {
        &[$(SubOption { key: $key, code: $code }),*]
    };
}

pub static CATEGORIES: &[Category] = &[
    Category {
        key: "producao",
        code: "opt_02",
        years: UNTIL_2023,
        sub_options: &[],
        layout: TableLayout::Categorized,
    },
    Category {
        key: "processamento",
        code: "opt_03",
        years: UNTIL_2023,
        sub_options: sub_options![
            "viniferas"             => "subopt_01",
            "americanas_e_hibridas" => "subopt_02",
            "uvas_de_mesa"          => "subopt_03",
            "sem_classificacao"     => "subopt_04",
        ],
        layout: TableLayout::Categorized,
    },
    Category {
        key: "comercializacao",
        code: "opt_04",
        years: UNTIL_2023,
        sub_options: &[],
        layout: TableLayout::Categorized,
    },
    Category {
        key: "importacao",
        code: "opt_05",
        years: UNTIL_2024,
        sub_options: sub_options![
            "vinhos_de_mesa" => "subopt_01",
            "espumantes"     => "subopt_02",
            "uvas_frescas"   => "subopt_03",
            "uvas_passas"    => "subopt_04",
            "suco_de_uva"    => "subopt_05",
        ],
        layout: TableLayout::Trade,
    },
    Category {
        key: "exportacao",
        code: "opt_06",
        years: UNTIL_2024,
        sub_options: sub_options![
            "vinhos_de_mesa" => "subopt_01",
            "espumantes"     => "subopt_02",
            "uvas_frescas"   => "subopt_03",
            "suco_de_uva"    => "subopt_04",
        ],
        layout: TableLayout::Trade,
    },
];
