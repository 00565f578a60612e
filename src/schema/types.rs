// src/schema/types.rs

/// How a column's raw text is coerced before it reaches the workbook.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum FieldClass {
    Text,
    Number,
    Percent,
    Date,
}

/// One column of the long-format output, in workbook order.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Manager,
    StartDate,
    EndDate,
    Network,
    Product,
    ReferenceMonth,
    PromoMonth,
    SalesUah,
    SalesUnits,
    MarginPct,
    DiscountPct,
}

impl Column {
    /// Fixed output order; the workbook never follows input order.
    pub const ALL: [Column; 11] = [
        Column::Manager,
        Column::StartDate,
        Column::EndDate,
        Column::Network,
        Column::Product,
        Column::ReferenceMonth,
        Column::PromoMonth,
        Column::SalesUah,
        Column::SalesUnits,
        Column::MarginPct,
        Column::DiscountPct,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Manager => "Менеджер",
            Column::StartDate => "Дата початку акції",
            Column::EndDate => "Дата закінчення акції",
            Column::Network => "Мережа",
            Column::Product => "Продукт",
            Column::ReferenceMonth => "Еталонний місяць",
            Column::PromoMonth => "Акційний місяць",
            Column::SalesUah => "Продажі грн",
            Column::SalesUnits => "Продажі шт",
            Column::MarginPct => "Маржа %",
            Column::DiscountPct => "Знижка %",
        }
    }

    pub fn class(self) -> FieldClass {
        match self {
            Column::Manager
            | Column::Network
            | Column::Product
            | Column::ReferenceMonth
            | Column::PromoMonth => FieldClass::Text,
            Column::StartDate | Column::EndDate => FieldClass::Date,
            Column::SalesUah | Column::SalesUnits => FieldClass::Number,
            Column::MarginPct | Column::DiscountPct => FieldClass::Percent,
        }
    }

    /// Reverse of [`Column::header`].
    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }

    /// 1-based position in the workbook.
    pub fn position(self) -> usize {
        Column::ALL
            .iter()
            .position(|c| *c == self)
            .map_or(0, |i| i + 1)
    }
}
