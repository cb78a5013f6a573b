//! Unbody query model.
//!
//! A chainable, typed stand-in for the content service's fluent query
//! builder. Plugins build a [`UnbodyQuery`]; whoever owns the service
//! connection renders it with [`UnbodyQuery::to_graphql`] and executes it.
//!
//! ```ignore
//! let q = UnbodyQuery::get(ContentType::GoogleDoc)
//!     .select(["title", "autoSummary"])
//!     .filter(|op| op.like("pathString", "/posts"))
//!     .about(vec!["rust".into()], 0.6);
//! ```

use serde::Serialize;

use crate::types::ContentType;

/// Where-clause predicate tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operator", rename_all = "PascalCase")]
pub enum Predicate {
    /// Wildcard string match on a text field.
    Like { path: String, value: String },
    /// Array field contains at least one of the values.
    ContainsAny { path: String, values: Vec<String> },
    /// All operands must match.
    And { operands: Vec<Predicate> },
    /// At least one operand must match.
    Or { operands: Vec<Predicate> },
}

/// Predicate constructors handed to [`UnbodyQuery::filter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Operators;

impl Operators {
    pub fn like(&self, path: &str, value: &str) -> Predicate {
        Predicate::Like {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn contains_any(&self, path: &str, values: &[String]) -> Predicate {
        Predicate::ContainsAny {
            path: path.into(),
            values: values.to_vec(),
        }
    }

    pub fn and(&self, operands: Vec<Predicate>) -> Predicate {
        Predicate::And { operands }
    }

    pub fn or(&self, operands: Vec<Predicate>) -> Predicate {
        Predicate::Or { operands }
    }
}

/// Semantic "about" search stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutSearch {
    pub concepts: Vec<String>,
    pub certainty: f64,
}

/// Generative stage over all matched records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateMany {
    pub prompt: String,
    pub properties: Vec<String>,
}

/// A composed query against one content collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnbodyQuery {
    collection: ContentType,
    fields: Vec<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    predicate: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    about: Option<AboutSearch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generate: Option<GenerateMany>,
}

impl UnbodyQuery {
    /// Start a query over a collection.
    pub fn get(collection: ContentType) -> Self {
        Self {
            collection,
            fields: Vec::new(),
            predicate: None,
            about: None,
            generate: None,
        }
    }

    /// Select the fields to return.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the where-clause from a predicate built with [`Operators`].
    pub fn filter<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&Operators) -> Predicate,
    {
        self.predicate = Some(build(&Operators));
        self
    }

    /// Add a semantic search stage.
    pub fn about(mut self, concepts: Vec<String>, certainty: f64) -> Self {
        self.about = Some(AboutSearch {
            concepts,
            certainty,
        });
        self
    }

    /// Add a generative stage over the matched records.
    pub fn generate_from_many<I, S>(mut self, prompt: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generate = Some(GenerateMany {
            prompt: prompt.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn collection(&self) -> ContentType {
        self.collection
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn about_search(&self) -> Option<&AboutSearch> {
        self.about.as_ref()
    }

    pub fn generation(&self) -> Option<&GenerateMany> {
        self.generate.as_ref()
    }

    /// Render the query as a GraphQL `Get` document.
    pub fn to_graphql(&self) -> String {
        let mut args = Vec::new();
        if let Some(ref predicate) = self.predicate {
            args.push(format!("where: {}", predicate_graphql(predicate)));
        }
        if let Some(ref about) = self.about {
            args.push(format!(
                "nearText: {{concepts: {}, certainty: {}}}",
                string_list(&about.concepts),
                about.certainty
            ));
        }

        let mut selection = self.fields.join(" ");
        if let Some(ref generate) = self.generate {
            if !selection.is_empty() {
                selection.push(' ');
            }
            selection.push_str(&format!(
                "_additional {{ generate(groupedResult: {{task: {}, properties: {}}}) {{ groupedResult error }} }}",
                quote(&generate.prompt),
                string_list(&generate.properties)
            ));
        }

        if args.is_empty() {
            format!("{{ Get {{ {} {{ {selection} }} }} }}", self.collection)
        } else {
            format!(
                "{{ Get {{ {}({}) {{ {selection} }} }} }}",
                self.collection,
                args.join(", ")
            )
        }
    }
}

fn predicate_graphql(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Like { path, value } => format!(
            "{{path: [{}], operator: Like, valueText: {}}}",
            quote(path),
            quote(value)
        ),
        Predicate::ContainsAny { path, values } => format!(
            "{{path: [{}], operator: ContainsAny, valueText: {}}}",
            quote(path),
            string_list(values)
        ),
        Predicate::And { operands } => compound_graphql("And", operands),
        Predicate::Or { operands } => compound_graphql("Or", operands),
    }
}

fn compound_graphql(operator: &str, operands: &[Predicate]) -> String {
    let rendered: Vec<String> = operands.iter().map(predicate_graphql).collect();
    format!(
        "{{operator: {operator}, operands: [{}]}}",
        rendered.join(", ")
    )
}

/// Quote a string literal. JSON string escaping is valid GraphQL.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn string_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_query_has_no_arguments() {
        let q = UnbodyQuery::get(ContentType::GoogleDoc).select(["title", "slug"]);
        assert_eq!(q.to_graphql(), "{ Get { GoogleDoc { title slug } } }");
        assert!(q.predicate().is_none());
    }

    #[test]
    fn filter_renders_nested_operators() {
        let filters = vec!["ai".to_string()];
        let q = UnbodyQuery::get(ContentType::GoogleDoc)
            .select(["title"])
            .filter(|op| {
                op.and(vec![
                    op.like("pathString", "/posts"),
                    op.or(vec![op.contains_any("autoTopics", &filters)]),
                ])
            });

        let gql = q.to_graphql();
        assert!(gql.contains("GoogleDoc(where: {operator: And"), "{gql}");
        assert!(gql.contains("operator: Like, valueText: \"/posts\""), "{gql}");
        assert!(gql.contains("operator: ContainsAny, valueText: [\"ai\"]"), "{gql}");
    }

    #[test]
    fn about_and_generate_render() {
        let q = UnbodyQuery::get(ContentType::TextDocument)
            .select(["title"])
            .about(vec!["rust".to_string()], 0.6)
            .generate_from_many("Summarize \"this\"", ["autoSummary"]);

        let gql = q.to_graphql();
        assert!(gql.contains("nearText: {concepts: [\"rust\"], certainty: 0.6}"), "{gql}");
        assert!(gql.contains("task: \"Summarize \\\"this\\\"\""), "{gql}");
        assert!(gql.contains("groupedResult error"), "{gql}");
    }

    #[test]
    fn predicate_serializes_with_operator_tag() {
        let p = Operators.like("pathString", "/posts");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["operator"], "Like");
        assert_eq!(json["path"], "pathString");
    }
}
