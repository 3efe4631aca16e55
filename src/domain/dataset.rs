//! Exported datasets
//!
//! The API exposes three independent collections. Each one has a fixed
//! endpoint, field list and destination file name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields requested for users, also the column order of `users.csv`
pub const USER_FIELDS: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "mail",
    "jobTitle",
    "gender",
    "legalEntityId",
    "departmentId",
    "managerId",
    "seniorityDate",
    "directLine",
];

/// Fields requested for departments
pub const DEPARTMENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "code",
    "hierarchy",
    "parentId",
    "isActive",
    "position",
    "level",
    "currentUsersCount",
    "headId",
];

/// Fields requested for work contracts
pub const CONTRACT_FIELDS: &[&str] = &[
    "id",
    "ownerId",
    "isApplicable",
    "internshipSupervisorId",
    "externalId",
    "startsOn",
    "endsOn",
    "trialPeriodDays",
    "renewedTrialPeriodDays",
    "trialPeriodEndDate",
    "trialPeriodEndDate2",
    "terminationReasonId",
    "authorId",
];

/// One of the collections pulled from the HR API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Employees, including former ones
    Users,
    /// Organisation departments
    Departments,
    /// Work contracts
    Contracts,
}

impl Dataset {
    /// Datasets in the order a full run processes them
    pub const ALL: [Dataset; 3] = [Dataset::Users, Dataset::Contracts, Dataset::Departments];

    /// Lowercase name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Users => "users",
            Dataset::Departments => "departments",
            Dataset::Contracts => "contracts",
        }
    }

    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Dataset::Users => "/api/v3/users",
            Dataset::Departments => "/api/v3/departments",
            Dataset::Contracts => "/directory/api/4.0/work-contracts",
        }
    }

    /// Requested fields, which double as the CSV columns
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Dataset::Users => USER_FIELDS,
            Dataset::Departments => DEPARTMENT_FIELDS,
            Dataset::Contracts => CONTRACT_FIELDS,
        }
    }

    /// Destination file name inside the dated output directory
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Dataset::Users),
            "departments" => Ok(Dataset::Departments),
            "contracts" => Ok(Dataset::Contracts),
            other => Err(format!("Unknown dataset: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_round_trips_through_name() {
        for dataset in Dataset::ALL {
            assert_eq!(Dataset::from_str(dataset.name()).unwrap(), dataset);
        }
        assert!(Dataset::from_str("payroll").is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Dataset::Users.file_name(), "users.csv");
        assert_eq!(Dataset::Departments.file_name(), "departments.csv");
        assert_eq!(Dataset::Contracts.file_name(), "contracts.csv");
    }

    #[test]
    fn test_field_lists_start_with_id() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.fields()[0], "id");
        }
        assert_eq!(CONTRACT_FIELDS.len(), 13);
    }
}
