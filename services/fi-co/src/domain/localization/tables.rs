//! 差异原因代码与科目对照表

use super::Jurisdiction;

pub const MATERIAL_PRICE: &str = "MATERIAL_PRICE";
pub const MATERIAL_USAGE: &str = "MATERIAL_USAGE";
pub const LABOR_RATE: &str = "LABOR_RATE";
pub const LABOR_EFFICIENCY: &str = "LABOR_EFFICIENCY";
pub const OVERHEAD_SPENDING: &str = "OVERHEAD_SPENDING";
pub const OVERHEAD_VOLUME: &str = "OVERHEAD_VOLUME";
pub const REVALUATION: &str = "REVALUATION";
pub const PURCHASE_PRICE: &str = "PURCHASE_PRICE";
pub const SCRAP: &str = "SCRAP";
pub const FX_TRANSLATION: &str = "FX_TRANSLATION";

/// 所有辖区共有的代码，按展示顺序
pub(crate) const COMMON_CODES: [&str; 7] = [
    MATERIAL_PRICE,
    MATERIAL_USAGE,
    LABOR_RATE,
    LABOR_EFFICIENCY,
    OVERHEAD_SPENDING,
    OVERHEAD_VOLUME,
    REVALUATION,
];

/// 辖区附加代码
pub(crate) fn extra_codes(jurisdiction: Jurisdiction) -> &'static [&'static str] {
    match jurisdiction {
        Jurisdiction::De | Jurisdiction::Cn => &[PURCHASE_PRICE],
        Jurisdiction::Jp => &[SCRAP],
        _ => &[],
    }
}

pub(crate) fn description(code: &str) -> &'static str {
    match code {
        MATERIAL_PRICE => "Material price variance",
        MATERIAL_USAGE => "Material usage variance",
        LABOR_RATE => "Labor rate variance",
        LABOR_EFFICIENCY => "Labor efficiency variance",
        OVERHEAD_SPENDING => "Overhead spending variance",
        OVERHEAD_VOLUME => "Overhead volume variance",
        REVALUATION => "Inventory revaluation",
        PURCHASE_PRICE => "Purchase price variance",
        SCRAP => "Scrap variance",
        FX_TRANSLATION => "Currency translation difference",
        _ => "Unclassified variance",
    }
}

type GlTable = &'static [(&'static str, &'static str)];

const US: GlTable = &[
    (MATERIAL_PRICE, "5100"),
    (MATERIAL_USAGE, "5110"),
    (LABOR_RATE, "5200"),
    (LABOR_EFFICIENCY, "5210"),
    (OVERHEAD_SPENDING, "5300"),
    (OVERHEAD_VOLUME, "5310"),
    (REVALUATION, "1410"),
    (FX_TRANSLATION, "7900"),
];

const CA: GlTable = &[
    (MATERIAL_PRICE, "5105"),
    (MATERIAL_USAGE, "5115"),
    (LABOR_RATE, "5205"),
    (LABOR_EFFICIENCY, "5215"),
    (OVERHEAD_SPENDING, "5305"),
    (OVERHEAD_VOLUME, "5315"),
    (REVALUATION, "1415"),
    (FX_TRANSLATION, "7905"),
];

const GB: GlTable = &[
    (MATERIAL_PRICE, "5010"),
    (MATERIAL_USAGE, "5011"),
    (LABOR_RATE, "5020"),
    (LABOR_EFFICIENCY, "5021"),
    (OVERHEAD_SPENDING, "5030"),
    (OVERHEAD_VOLUME, "5031"),
    (REVALUATION, "1001"),
    (FX_TRANSLATION, "8300"),
];

const DE: GlTable = &[
    (MATERIAL_PRICE, "5880"),
    (MATERIAL_USAGE, "5881"),
    (LABOR_RATE, "6010"),
    (LABOR_EFFICIENCY, "6011"),
    (OVERHEAD_SPENDING, "6300"),
    (OVERHEAD_VOLUME, "6301"),
    (REVALUATION, "3960"),
    (PURCHASE_PRICE, "5885"),
    (FX_TRANSLATION, "6880"),
];

const FR: GlTable = &[
    (MATERIAL_PRICE, "6031"),
    (MATERIAL_USAGE, "6032"),
    (LABOR_RATE, "6411"),
    (LABOR_EFFICIENCY, "6413"),
    (OVERHEAD_SPENDING, "6181"),
    (OVERHEAD_VOLUME, "6182"),
    (REVALUATION, "6037"),
    (FX_TRANSLATION, "6660"),
];

const CN: GlTable = &[
    (MATERIAL_PRICE, "1404.01"),
    (MATERIAL_USAGE, "5001.01"),
    (LABOR_RATE, "5001.02"),
    (LABOR_EFFICIENCY, "5001.03"),
    (OVERHEAD_SPENDING, "5101.01"),
    (OVERHEAD_VOLUME, "5101.02"),
    (REVALUATION, "1405.01"),
    (PURCHASE_PRICE, "1404.02"),
    (FX_TRANSLATION, "6603"),
];

const JP: GlTable = &[
    (MATERIAL_PRICE, "5311"),
    (MATERIAL_USAGE, "5312"),
    (LABOR_RATE, "5321"),
    (LABOR_EFFICIENCY, "5322"),
    (OVERHEAD_SPENDING, "5331"),
    (OVERHEAD_VOLUME, "5332"),
    (REVALUATION, "1151"),
    (SCRAP, "5340"),
    (FX_TRANSLATION, "8310"),
];

const IN: GlTable = &[
    (MATERIAL_PRICE, "5401"),
    (MATERIAL_USAGE, "5402"),
    (LABOR_RATE, "5411"),
    (LABOR_EFFICIENCY, "5412"),
    (OVERHEAD_SPENDING, "5421"),
    (OVERHEAD_VOLUME, "5422"),
    (REVALUATION, "1301"),
    (FX_TRANSLATION, "7601"),
];

/// 兜底科目表，覆盖所有代码
const DEFAULT: GlTable = &[
    (MATERIAL_PRICE, "5900"),
    (MATERIAL_USAGE, "5901"),
    (PURCHASE_PRICE, "5902"),
    (LABOR_RATE, "5910"),
    (LABOR_EFFICIENCY, "5911"),
    (OVERHEAD_SPENDING, "5920"),
    (OVERHEAD_VOLUME, "5921"),
    (SCRAP, "5930"),
    (FX_TRANSLATION, "5980"),
    (REVALUATION, "5990"),
];

pub(crate) fn gl_table(jurisdiction: Jurisdiction) -> GlTable {
    match jurisdiction {
        Jurisdiction::Us => US,
        Jurisdiction::Ca => CA,
        Jurisdiction::Gb => GB,
        Jurisdiction::De => DE,
        Jurisdiction::Fr => FR,
        Jurisdiction::Cn => CN,
        Jurisdiction::Jp => JP,
        Jurisdiction::In => IN,
        Jurisdiction::Default => DEFAULT,
    }
}

/// 查找科目，辖区表缺失时回落到兜底表
pub(crate) fn gl_account(jurisdiction: Jurisdiction, code: &str) -> &'static str {
    lookup(gl_table(jurisdiction), code)
        .or_else(|| lookup(DEFAULT, code))
        .unwrap_or("5999")
}

fn lookup(table: GlTable, code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, account)| *account)
}
