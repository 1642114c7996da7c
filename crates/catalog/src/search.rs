//! In-memory catalog search.
//!
//! Scores each command against whitespace-separated query tokens. Every token
//! must appear somewhere in the command's searchable text; matches on the
//! display name are boosted over matches buried in descriptions.

use clitutor_types::Command;

use crate::Catalog;

const DEFAULT_RESULT_LIMIT: usize = 20;
const COVERAGE_SCORE_MULTIPLIER: i64 = 20;
const EXACT_NAME_MATCH_SCORE_BONUS: i64 = 100;
const PREFIX_NAME_MATCH_SCORE_BONUS: i64 = 50;
const NAME_CONTAINS_SCORE_BONUS: i64 = 25;

/// Ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub command: &'a Command,
    pub score: i64,
}

impl Catalog {
    /// Searches ids, names, descriptions and examples, best matches first.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        self.search_with_limit(query, DEFAULT_RESULT_LIMIT)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        let query_lower = query.trim().to_lowercase();
        let query_tokens = tokenize_query(&query_lower);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut hits = self
            .commands()
            .iter()
            .filter_map(|command| {
                score_command_match(command, &query_lower, &query_tokens).map(|score| SearchHit { command, score })
            })
            .collect::<Vec<_>>();

        hits.sort_by(|left, right| {
            right
                .score
                .cmp(&left.score)
                .then_with(|| left.command.name.cmp(&right.command.name))
        });
        hits.truncate(limit);
        hits
    }
}

fn score_command_match(command: &Command, query_lower: &str, query_tokens: &[String]) -> Option<i64> {
    let haystack = build_search_haystack(command);
    if !query_tokens.iter().all(|token| haystack.contains(token.as_str())) {
        return None;
    }

    let coverage_score = query_tokens.len() as i64 * COVERAGE_SCORE_MULTIPLIER;
    let name_lower = command.name.to_lowercase();
    let name_bonus = if name_lower == query_lower || command.id == query_lower {
        EXACT_NAME_MATCH_SCORE_BONUS
    } else if name_lower.starts_with(query_lower) {
        PREFIX_NAME_MATCH_SCORE_BONUS
    } else if name_lower.contains(query_lower) {
        NAME_CONTAINS_SCORE_BONUS
    } else {
        0
    };

    Some(coverage_score + name_bonus)
}

fn build_search_haystack(command: &Command) -> String {
    [
        command.id.as_str(),
        command.name.as_str(),
        command.description.as_str(),
        command.example.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
