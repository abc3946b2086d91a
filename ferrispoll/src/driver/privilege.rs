//! Privilege level tracking and navigation.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use regex::bytes::Regex;

use crate::error::{DriverError, Result};
use crate::platform::PrivilegeLevel;

/// Tracks the current CLI mode and plans moves between modes.
///
/// Levels are connected to their parent in both directions, so any level
/// can be reached from any other by walking the tree.
#[derive(Debug)]
pub struct PrivilegeManager {
    levels: IndexMap<String, PrivilegeLevel>,
    graph: HashMap<String, HashSet<String>>,
    current: Option<String>,
}

/// Command (and optional password prompt) to move one step.
#[derive(Debug, Clone)]
pub struct Transition {
    pub command: String,
    pub auth_prompt: Option<Regex>,
}

impl PrivilegeManager {
    pub fn new(levels: IndexMap<String, PrivilegeLevel>) -> Self {
        let mut graph: HashMap<String, HashSet<String>> = HashMap::new();
        for (name, level) in &levels {
            graph.entry(name.clone()).or_default();
            if let Some(parent) = &level.parent {
                graph.entry(name.clone()).or_default().insert(parent.clone());
                graph.entry(parent.clone()).or_default().insert(name.clone());
            }
        }

        Self {
            levels,
            graph,
            current: None,
        }
    }

    /// Level whose pattern matches `prompt`.
    pub fn determine_from_prompt(&self, prompt: &str) -> Result<&PrivilegeLevel> {
        self.levels
            .values()
            .find(|level| level.matches(prompt))
            .ok_or_else(|| {
                DriverError::UnknownPrivilege {
                    prompt: prompt.to_string(),
                }
                .into()
            })
    }

    /// Update the current level from a prompt; unknown prompts leave it unchanged.
    pub fn observe_prompt(&mut self, prompt: &str) -> Option<&str> {
        let detected = self
            .determine_from_prompt(prompt)
            .ok()
            .map(|level| level.name.clone());
        if detected.is_some() {
            self.current = detected;
        }
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Shortest path of level names from `from` to `to`, both included.
    pub fn find_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        if from == to {
            return Ok(vec![from.to_string()]);
        }

        let mut queue = VecDeque::from([from.to_string()]);
        let mut visited = HashSet::from([from.to_string()]);
        let mut came_from: HashMap<String, String> = HashMap::new();

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![to.to_string()];
                let mut cursor = to;
                while let Some(prev) = came_from.get(cursor) {
                    path.push(prev.clone());
                    cursor = prev.as_str();
                }
                path.reverse();
                return Ok(path);
            }

            for next in self.graph.get(&node).into_iter().flatten() {
                if visited.insert(next.clone()) {
                    came_from.insert(next.clone(), node.clone());
                    queue.push_back(next.clone());
                }
            }
        }

        Err(DriverError::NoPrivilegePath {
            from: from.to_string(),
            to: to.to_string(),
        }
        .into())
    }

    /// How to move between two adjacent levels.
    pub fn transition(&self, from: &str, to: &str) -> Option<Transition> {
        let from_level = self.levels.get(from)?;
        let to_level = self.levels.get(to)?;

        if to_level.parent.as_deref() == Some(from) {
            return Some(Transition {
                command: to_level.escalate_command.clone()?,
                auth_prompt: to_level.auth_prompt.clone(),
            });
        }

        if from_level.parent.as_deref() == Some(to) {
            return Some(Transition {
                command: from_level.deescalate_command.clone()?,
                auth_prompt: None,
            });
        }

        None
    }
}
