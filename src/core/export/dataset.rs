//! Per-dataset export parameters

use crate::core::extract::JsonPath;
use crate::core::pagination::PaginationStyle;
use crate::domain::Dataset;

/// Everything needed to export one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    /// Dataset being exported
    pub dataset: Dataset,
    /// Endpoint path relative to the base URL
    pub endpoint: String,
    /// Query parameters sent with every page
    pub params: Vec<(String, String)>,
    /// CSV columns, in order
    pub columns: Vec<String>,
    /// Location of the record array in each response
    pub path: JsonPath,
    /// Destination file name
    pub file_name: String,
    /// Initial cursor
    pub pagination: PaginationStyle,
}

impl DatasetSpec {
    /// Parameters for `dataset` with pages of `limit` records
    pub fn for_dataset(dataset: Dataset, limit: u32) -> Self {
        match dataset {
            Dataset::Users => Self::users(limit),
            Dataset::Departments => Self::departments(limit),
            Dataset::Contracts => Self::contracts(limit),
        }
    }

    /// All employees, former ones included
    pub fn users(limit: u32) -> Self {
        let mut spec = Self::base(
            Dataset::Users,
            JsonPath::new(["data", "items"]),
            PaginationStyle::offset(limit),
        );
        spec.params
            .insert(0, ("formerEmployees".to_string(), "true".to_string()));
        spec
    }

    pub fn departments(limit: u32) -> Self {
        Self::base(
            Dataset::Departments,
            JsonPath::new(["data", "items"]),
            PaginationStyle::offset(limit),
        )
    }

    /// Work contracts from the directory API, paged by page number
    pub fn contracts(limit: u32) -> Self {
        Self::base(
            Dataset::Contracts,
            JsonPath::new(["items"]),
            PaginationStyle::pages(limit),
        )
    }

    fn base(dataset: Dataset, path: JsonPath, pagination: PaginationStyle) -> Self {
        let fields = dataset.fields();
        Self {
            dataset,
            endpoint: dataset.endpoint().to_string(),
            params: vec![("fields".to_string(), fields.join(","))],
            columns: fields.iter().map(|f| f.to_string()).collect(),
            path,
            file_name: dataset.file_name(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_users_spec() {
        let spec = DatasetSpec::users(100);
        assert_eq!(spec.endpoint, "/api/v3/users");
        assert_eq!(spec.params[0], ("formerEmployees".to_string(), "true".to_string()));
        assert_eq!(spec.params[1].0, "fields");
        assert!(spec.params[1].1.starts_with("id,firstName,lastName,mail"));
        assert_eq!(spec.path.to_string(), "data.items");
        assert_eq!(spec.pagination, PaginationStyle::OffsetLimit { offset: 0, limit: 100 });
        assert_eq!(spec.file_name, "users.csv");
    }

    #[test]
    fn test_contracts_spec_uses_page_numbers() {
        let spec = DatasetSpec::contracts(50);
        assert_eq!(spec.endpoint, "/directory/api/4.0/work-contracts");
        assert_eq!(spec.path.to_string(), "items");
        assert_eq!(spec.pagination, PaginationStyle::PageLimit { page: 1, limit: 50 });
        assert_eq!(spec.columns.len(), 13);
    }

    #[test_case(Dataset::Users ; "users")]
    #[test_case(Dataset::Departments ; "departments")]
    #[test_case(Dataset::Contracts ; "contracts")]
    fn test_columns_match_requested_fields(dataset: Dataset) {
        let spec = DatasetSpec::for_dataset(dataset, 10);
        let fields = spec
            .params
            .iter()
            .find(|(k, _)| k == "fields")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(fields, spec.columns.join(","));
        assert_eq!(spec.dataset, dataset);
        assert_eq!(spec.pagination.limit(), 10);
    }
}
