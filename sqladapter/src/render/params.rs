// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Execute parameters: the logical operations applied on top of a script

use crate::types::{PageInfo, ValueType};
use serde::{Deserialize, Serialize};

/// A typed operand value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTypedValue {
    pub value: String,
    pub value_type: ValueType,
}

impl SingleTypedValue {
    pub fn new(value: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            value: value.into(),
            value_type,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value, ValueType::String)
    }

    pub fn numeric(value: impl ToString) -> Self {
        Self::new(value.to_string(), ValueType::Numeric)
    }
}

/// Aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateFunction {
    Sum,
    Avg,
    Max,
    Min,
    Count,
    CountDistinct,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Count | AggregateFunction::CountDistinct => "COUNT",
        }
    }
}

/// Filter comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
    Between,
}

/// Output column taken as is from the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectColumn {
    pub column: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOperator {
    /// Column to aggregate; `*` is allowed for `COUNT`
    pub column: String,
    pub function: AggregateFunction,
    #[serde(default)]
    pub alias: Option<String>,
}

impl AggregateOperator {
    /// Alias of the output column: explicit, or `FUNC(column)`
    pub fn output_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => match self.function {
                AggregateFunction::CountDistinct => format!("COUNT(DISTINCT {})", self.column),
                f => format!("{}({})", f.name(), self.column),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOperator {
    pub column: String,
    pub operator: SqlOperator,
    #[serde(default)]
    pub values: Vec<SingleTypedValue>,
    /// Filter on an aggregate of the column (rendered in `HAVING`)
    #[serde(default)]
    pub aggregate: Option<AggregateFunction>,
}

impl FilterOperator {
    pub fn new(column: impl Into<String>, operator: SqlOperator) -> Self {
        Self {
            column: column.into(),
            operator,
            values: Vec::new(),
            aggregate: None,
        }
    }

    pub fn with_value(mut self, value: SingleTypedValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn with_aggregate(mut self, function: AggregateFunction) -> Self {
        self.aggregate = Some(function);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByOperator {
    pub column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOperator {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
    /// Order by an aggregate of the column
    #[serde(default)]
    pub aggregate: Option<AggregateFunction>,
}

/// Runtime parameters of one execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteParams {
    #[serde(default)]
    pub selectors: Vec<SelectColumn>,
    #[serde(default)]
    pub aggregators: Vec<AggregateOperator>,
    #[serde(default)]
    pub filters: Vec<FilterOperator>,
    #[serde(default)]
    pub groups: Vec<GroupByOperator>,
    #[serde(default)]
    pub orders: Vec<OrderOperator>,
    #[serde(default)]
    pub page_info: PageInfo,
    /// Disable server-side aggregation: fetch everything and aggregate locally
    #[serde(default)]
    pub local_aggregate: bool,
}

impl ExecuteParams {
    pub fn new(page_info: PageInfo) -> Self {
        Self {
            page_info,
            ..Default::default()
        }
    }

    pub fn select(mut self, column: impl Into<String>) -> Self {
        self.selectors.push(SelectColumn {
            column: column.into(),
            alias: None,
        });
        self
    }

    pub fn select_as(mut self, column: impl Into<String>, alias: impl Into<String>) -> Self {
        self.selectors.push(SelectColumn {
            column: column.into(),
            alias: Some(alias.into()),
        });
        self
    }

    pub fn aggregate(
        mut self,
        function: AggregateFunction,
        column: impl Into<String>,
        alias: Option<&str>,
    ) -> Self {
        self.aggregators.push(AggregateOperator {
            column: column.into(),
            function,
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn filter(mut self, filter: FilterOperator) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.groups.push(GroupByOperator {
            column: column.into(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.orders.push(OrderOperator {
            column: column.into(),
            direction,
            aggregate: None,
        });
        self
    }

    pub fn with_local_aggregate(mut self, local_aggregate: bool) -> Self {
        self.local_aggregate = local_aggregate;
        self
    }

    /// Whether any operation has to be rendered around the script
    pub fn has_operations(&self) -> bool {
        !(self.selectors.is_empty()
            && self.aggregators.is_empty()
            && self.filters.is_empty()
            && self.groups.is_empty()
            && self.orders.is_empty())
    }
}
