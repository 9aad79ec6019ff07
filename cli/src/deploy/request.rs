//! Deployment request built from the `deploy` command line
//!
//! ```text
//! rd deploy PROJECT [PACKAGE] SERVER.INSTALLATION.CONFIGURATION [@@KEY@@=VALUE ...]
//! ```

use std::str::FromStr;

use url::form_urlencoded;

use crate::errors::CliError;

const DEPLOY_USAGE: &str =
    "Usage: rd deploy PROJECT [PACKAGE] SERVER.INSTALLATION.CONFIGURATION [@@KEY@@=VALUE ...]";

/// `SERVER.INSTALLATION.CONFIGURATION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub server: String,
    pub installation: String,
    pub configuration: String,
}

impl FromStr for DeployTarget {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('.').collect::<Vec<_>>().as_slice() {
            [server, installation, configuration] => Ok(Self {
                server: server.to_string(),
                installation: installation.to_string(),
                configuration: configuration.to_string(),
            }),
            _ => Err(CliError::InvalidTarget(s.to_string())),
        }
    }
}

impl std::fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.server, self.installation, self.configuration)
    }
}

/// Whether `arg` reads `@@KEY@@=VALUE` with a single `=`
pub fn is_dictionary_item(arg: &str) -> bool {
    match arg.split_once('=') {
        Some((key, value)) => !value.contains('=') && key.starts_with("@@") && key.ends_with("@@"),
        None => false,
    }
}

/// A validated deployment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub project: String,
    /// Empty selects the latest package
    pub package: String,
    pub target: DeployTarget,
    pub dictionary_items: Vec<String>,
}

impl DeployRequest {
    /// Read the positional arguments of `deploy`.
    ///
    /// The first two arguments are never dictionary items. A third plain
    /// argument makes the second one the package and the third the target.
    /// Everything after that must be a dictionary item.
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        let usage = || CliError::Usage(DEPLOY_USAGE.to_string());

        let (project, second, rest) = match args {
            [project, second, rest @ ..] => (project, second, rest),
            _ => return Err(usage()),
        };
        if is_dictionary_item(project) || is_dictionary_item(second) {
            return Err(usage());
        }

        let mut package = String::new();
        let mut target = second.as_str();
        let mut dictionary_items = Vec::new();

        if let Some((third, tail)) = rest.split_first() {
            if is_dictionary_item(third) {
                dictionary_items.push(third.clone());
            } else {
                package = second.clone();
                target = third.as_str();
            }
            for item in tail {
                if !is_dictionary_item(item) {
                    return Err(usage());
                }
                dictionary_items.push(item.clone());
            }
        }

        Ok(Self {
            project: project.clone(),
            package,
            target: target.parse()?,
            dictionary_items,
        })
    }

    /// API path that triggers this deployment
    pub fn path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("packageName", &self.package);
        for item in &self.dictionary_items {
            query.append_pair("dictionaryItem", item);
        }
        format!(
            "deployment/{}/runjob/deploy/{}/{}/{}?{}",
            self.project,
            self.target.server,
            self.target.installation,
            self.target.configuration,
            query.finish()
        )
    }
}
