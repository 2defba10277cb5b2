use crate::query::SqlFilter;
use seekset_model::core::value::Value;
use seekset_model::ordering::operator::Operator;

/// One comparison of the form `column operator value`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Conjunct {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl Conjunct {
    pub fn new(column: impl Into<String>, operator: Operator, value: Value) -> Self {
        Conjunct {
            column: column.into(),
            operator,
            value,
        }
    }

    // `column operator ?` plus the bound value, timestamp-sniffed.
    fn to_sql(&self) -> (String, Value) {
        (
            format!("{} {} ?", self.column, self.operator),
            self.value.clone().normalized(),
        )
    }
}

/// Conjuncts joined by AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Disjunct(pub Vec<Conjunct>);

impl Disjunct {
    // `(a AND b)` with its params; `None` for the empty disjunct, which is
    // skipped by the enclosing DNF.
    fn to_sql(&self) -> Option<(String, Vec<Value>)> {
        if self.0.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(self.0.len());
        let mut params = Vec::with_capacity(self.0.len());
        for conjunct in &self.0 {
            let (clause, param) = conjunct.to_sql();
            clauses.push(clause);
            params.push(param);
        }

        Some((format!("({})", clauses.join(" AND ")), params))
    }
}

/// Disjunctive normal form of a resumption filter: disjuncts joined by OR,
/// each disjunct a list of conjuncts joined by AND.
///
/// The keyset expansion of elements `[(C1,O1,V1) … (Cn,On,Vn)]` is
///
/// ```text
/// (C1 O1 V1) OR (C1 = V1 AND C2 O2 V2) OR …
///     OR (C1 = V1 AND … AND Cn-1 = Vn-1 AND Cn On Vn)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Dnf(pub Vec<Disjunct>);

impl Dnf {
    /// Renders `((…) OR (…))` with params in reading order, or the literal
    /// always-true condition when no disjunct survives.
    pub fn to_filter(&self) -> SqlFilter {
        let mut clauses = Vec::with_capacity(self.0.len());
        let mut params = Vec::new();

        for disjunct in &self.0 {
            if let Some((clause, mut disjunct_params)) = disjunct.to_sql() {
                clauses.push(clause);
                params.append(&mut disjunct_params);
            }
        }

        if clauses.is_empty() {
            return SqlFilter::new("TRUE", Vec::new());
        }

        SqlFilter::new(format!("({})", clauses.join(" OR ")), params)
    }
}
