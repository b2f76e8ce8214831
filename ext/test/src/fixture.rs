//! Conformance fixture runner
//!
//! Loads YAML fixtures and runs them against the trail engine.

use serde::Deserialize;
use std::collections::BTreeMap;
use trail::{ParamValue, PathConfig, QueryConfig};

/// A complete test fixture: one path and/or query configuration plus the
/// cases to run against it.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub path: Option<PathConfig>,
    #[serde(default)]
    pub query: Option<QueryConfig>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// One test case.
///
/// Uses untagged deserialization — the operation field names (`match`,
/// `distance`, `build`, `parse`, `build_query`) keep the variants apart.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TestCase {
    Match(MatchCase),
    Distance(DistanceCase),
    Build(BuildCase),
    QueryParse(QueryParseCase),
    QueryBuild(QueryBuildCase),
}

/// Match a candidate path; `expect: ~` means no match.
#[derive(Debug, Deserialize)]
pub struct MatchCase {
    pub name: String,
    #[serde(rename = "match")]
    pub input: String,
    pub expect: Option<MatchExpect>,
}

/// Expected rich match outcome.
#[derive(Debug, Deserialize)]
pub struct MatchExpect {
    pub exact: bool,
    pub values: BTreeMap<String, serde_json::Value>,
}

/// Raw signed distance for a candidate path.
#[derive(Debug, Deserialize)]
pub struct DistanceCase {
    pub name: String,
    pub distance: String,
    pub expect: i64,
}

/// Build a path string from typed values.
#[derive(Debug, Deserialize)]
pub struct BuildCase {
    pub name: String,
    pub build: BTreeMap<String, serde_json::Value>,
    pub expect: String,
}

/// Parse a query string into typed value sequences.
#[derive(Debug, Deserialize)]
pub struct QueryParseCase {
    pub name: String,
    pub parse: String,
    pub expect: BTreeMap<String, Vec<serde_json::Value>>,
}

/// Build a query string from (possibly partial) typed value sequences.
#[derive(Debug, Deserialize)]
pub struct QueryBuildCase {
    pub name: String,
    pub build_query: BTreeMap<String, Vec<serde_json::Value>>,
    pub expect: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case.
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub detail: String,
}

fn to_values(map: &BTreeMap<String, serde_json::Value>) -> BTreeMap<String, ParamValue> {
    map.iter()
        .map(|(key, literal)| (key.clone(), ParamValue::from(literal.clone())))
        .collect()
}

fn to_value_seqs(
    map: &BTreeMap<String, Vec<serde_json::Value>>,
) -> BTreeMap<String, Vec<ParamValue>> {
    map.iter()
        .map(|(key, literals)| {
            (
                key.clone(),
                literals
                    .iter()
                    .map(|literal| ParamValue::from(literal.clone()))
                    .collect(),
            )
        })
        .collect()
}

impl Fixture {
    /// Parse a fixture from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results.
    ///
    /// Panics if a case references a configuration the fixture does not
    /// declare, or the configuration fails to compile — both are fixture
    /// authoring errors, not engine outcomes.
    pub fn run(&self) -> Vec<CaseResult> {
        let path = self
            .path
            .as_ref()
            .map(|config| config.to_path().expect("fixture path config compiles"));
        let query = self
            .query
            .as_ref()
            .map(|config| config.to_query().expect("fixture query config compiles"));

        self.cases
            .iter()
            .map(|case| match case {
                TestCase::Match(case) => {
                    let path = path.as_ref().expect("fixture declares a path");
                    let actual = path.match_path(&case.input);
                    let expected = case.expect.as_ref().map(|expect| trail::PathMatch {
                        values: to_values(&expect.values),
                        exact: expect.exact,
                    });
                    CaseResult {
                        case_name: case.name.clone(),
                        passed: actual == expected,
                        detail: format!("expected {expected:?}, got {actual:?}"),
                    }
                }
                TestCase::Distance(case) => {
                    let path = path.as_ref().expect("fixture declares a path");
                    let actual = path.distance(&case.distance);
                    CaseResult {
                        case_name: case.name.clone(),
                        passed: actual == case.expect as isize,
                        detail: format!("expected {}, got {actual}", case.expect),
                    }
                }
                TestCase::Build(case) => {
                    let path = path.as_ref().expect("fixture declares a path");
                    let actual = path.build(&to_values(&case.build));
                    CaseResult {
                        case_name: case.name.clone(),
                        passed: actual.as_deref() == Ok(case.expect.as_str()),
                        detail: format!("expected {:?}, got {actual:?}", case.expect),
                    }
                }
                TestCase::QueryParse(case) => {
                    let query = query.as_ref().expect("fixture declares a query");
                    let actual = query.parse(&case.parse);
                    let expected = to_value_seqs(&case.expect);
                    CaseResult {
                        case_name: case.name.clone(),
                        passed: actual == expected,
                        detail: format!("expected {expected:?}, got {actual:?}"),
                    }
                }
                TestCase::QueryBuild(case) => {
                    let query = query.as_ref().expect("fixture declares a query");
                    let actual = query.build(&to_value_seqs(&case.build_query));
                    CaseResult {
                        case_name: case.name.clone(),
                        passed: actual == case.expect,
                        detail: format!("expected {:?}, got {actual:?}", case.expect),
                    }
                }
            })
            .collect()
    }

    /// Run all test cases and panic on the first failure.
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "fixture '{}' case '{}' failed: {}",
                self.name, result.case_name, result.detail
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_round_trips_from_yaml() {
        let yaml = r#"
name: smoke
description: one of each case kind
path:
  template: /text/:name
  params:
    name: { type: string }
query:
  params:
    a: { type: number }
cases:
  - name: match hit
    match: /text/bob
    expect:
      exact: true
      values: { name: bob }
  - name: match miss
    match: /nope
    expect: ~
  - name: distance
    distance: /text
    expect: -1
  - name: build
    build: { name: "fo o" }
    expect: /text/fo%20o
  - name: query parse
    parse: a=1&a=2
    expect: { a: [1, 2] }
  - name: query build
    build_query: { a: [1, 2, 3] }
    expect: a=1&a=2&a=3
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.cases.len(), 6);
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document_yaml_splits_into_fixtures() {
        let yaml = r#"
name: first
description: first doc
cases: []
---
name: second
description: second doc
cases: []
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].name, "first");
        assert_eq!(fixtures[1].name, "second");
    }
}
