//! Pruned traversal of the mission planning directory tree.
//!
//! The tree follows a fixed convention: year directories (`2007`) hold
//! week directories (`JAN0107`), which hold version directories (`oflsa`),
//! optionally followed by a requested subdirectory chain. Traversal is an
//! explicit state machine: each state names the child-directory pattern
//! expected one level down, and the first directory where no pattern
//! applies is a leaf where file matching happens.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref WEEK_RE: Regex = Regex::new(r"^[A-Z]{3}\d{4}$").unwrap();
    static ref VERSION_RE: Regex = Regex::new(r"^ofls[a-z]$").unwrap();
}

/// Traversal state, naming the directory level being visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkState {
    /// Archive root: expect year directories below.
    Root,
    /// Year directory: expect week directories below.
    Year,
    /// Week directory: expect version directories below.
    Week,
    /// Version directory: expect the first chain segment, or collect here.
    Version,
    /// Inside the requested chain, `usize` segments consumed so far.
    SubdirChain(usize),
    /// No pattern applies: match files here, descend no further.
    Leaf,
}

/// Depth-first walker collecting the first matching file per leaf.
pub(crate) struct Walker<'a> {
    chain: &'a [String],
    name_regex: &'a Regex,
    located: Vec<PathBuf>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(chain: &'a [String], name_regex: &'a Regex) -> Self {
        Self {
            chain,
            name_regex,
            located: Vec::new(),
        }
    }

    pub(crate) fn into_located(self) -> Vec<PathBuf> {
        self.located
    }

    /// States whose continuation depends on the chain collapse to `Leaf`
    /// once the chain is exhausted.
    fn resolve(&self, state: WalkState) -> WalkState {
        match state {
            WalkState::Version if self.chain.is_empty() => WalkState::Leaf,
            WalkState::SubdirChain(consumed) if consumed >= self.chain.len() => WalkState::Leaf,
            other => other,
        }
    }

    /// Transition table: the state a child directory named `name` is
    /// entered with, or `None` when the child is pruned.
    fn child_state(&self, state: WalkState, name: &str) -> Option<WalkState> {
        match state {
            WalkState::Root => YEAR_RE.is_match(name).then_some(WalkState::Year),
            WalkState::Year => WEEK_RE.is_match(name).then_some(WalkState::Week),
            WalkState::Week => VERSION_RE.is_match(name).then_some(WalkState::Version),
            WalkState::Version => self
                .chain
                .first()
                .is_some_and(|segment| segment == name)
                .then_some(WalkState::SubdirChain(1)),
            WalkState::SubdirChain(consumed) => self
                .chain
                .get(consumed)
                .is_some_and(|segment| segment == name)
                .then_some(WalkState::SubdirChain(consumed + 1)),
            WalkState::Leaf => None,
        }
    }

    /// Walk `dir` in `state`. Unreadable directories are logged and
    /// skipped; absence of matches is not an error.
    pub(crate) fn walk(&mut self, dir: &Path, state: WalkState) {
        let state = self.resolve(state);
        log::debug!("scanning {} as {:?}", dir.display(), state);

        if state == WalkState::Leaf {
            self.collect(dir);
            return;
        }

        for (name, path) in sorted_child_dirs(dir) {
            if let Some(next) = self.child_state(state, &name) {
                self.walk(&path, next);
            }
        }
    }

    /// Match files in a leaf directory. Only the first match (in sorted
    /// name order) is kept.
    fn collect(&mut self, dir: &Path) {
        let mut names: Vec<String> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(std::result::Result::ok)
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .collect(),
            Err(e) => {
                log::warn!("could not read {}: {e}", dir.display());
                return;
            }
        };
        names.sort();

        match names.iter().find(|name| self.matches_name(name)) {
            Some(name) => {
                let path = dir.join(name);
                log::info!("located file {}", path.display());
                self.located.push(path);
            }
            None => log::info!("no matching file in {}", dir.display()),
        }
    }

    /// Regex match anchored at the start of the basename.
    fn matches_name(&self, name: &str) -> bool {
        self.name_regex
            .find(name)
            .is_some_and(|m| m.start() == 0)
    }
}

fn sorted_child_dirs(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut children: Vec<(String, PathBuf)> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                Some((name, entry.path()))
            })
            .collect(),
        Err(e) => {
            log::warn!("could not read {}: {e}", dir.display());
            Vec::new()
        }
    };
    children.sort();
    children
}
