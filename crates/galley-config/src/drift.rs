//! Field-by-field comparison of two descriptors meant to describe the same build.

use std::fmt;

use crate::descriptor::BuildConfig;
use crate::dev::DevServerConfig;
use crate::proxy::{ProxyRoute, ProxyTable};

const ABSENT: &str = "<none>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub field: String,
    pub left: String,
    pub right: String,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} != {}", self.field, self.left, self.right)
    }
}

/// Every field where `left` and `right` disagree. Empty means equivalent.
pub fn compare(left: &BuildConfig, right: &BuildConfig) -> Vec<Drift> {
    let mut drifts = Vec::new();
    let mut check = |field: &str, l: String, r: String| {
        if l != r {
            drifts.push(Drift {
                field: field.to_string(),
                left: l,
                right: r,
            });
        }
    };

    check("mode", left.mode.to_string(), right.mode.to_string());
    check("entry", left.entry.join(", "), right.entry.join(", "));
    check(
        "output.filename",
        left.output.filename.clone(),
        right.output.filename.clone(),
    );
    check(
        "output.path",
        left.output.path.display().to_string(),
        right.output.path.display().to_string(),
    );
    check("rules", describe_rules(left), describe_rules(right));
    check(
        "resolve.extensions",
        left.resolve.extensions.join(", "),
        right.resolve.extensions.join(", "),
    );

    for key in union(left.resolve.alias.keys(), right.resolve.alias.keys()) {
        check(
            &format!("resolve.alias.{key}"),
            lookup(left.resolve.alias.get(&key)),
            lookup(right.resolve.alias.get(&key)),
        );
    }
    check(
        "resolve.modules",
        left.resolve.modules.join(", "),
        right.resolve.modules.join(", "),
    );

    check(
        "dev_server.host",
        dev_field(left, |d| d.host.clone()),
        dev_field(right, |d| d.host.clone()),
    );
    check(
        "dev_server.port",
        dev_field(left, describe_port),
        dev_field(right, describe_port),
    );
    check(
        "dev_server.content_base",
        dev_field(left, |d| d.content_base.display().to_string()),
        dev_field(right, |d| d.content_base.display().to_string()),
    );

    let left_proxy = left.proxy_table();
    let right_proxy = right.proxy_table();
    let prefixes = union(
        left_proxy.routes().iter().map(|r| &r.prefix),
        right_proxy.routes().iter().map(|r| &r.prefix),
    );
    for prefix in prefixes {
        let route = |table: &ProxyTable| {
            table
                .routes()
                .iter()
                .find(|r| r.prefix == prefix)
                .map_or_else(|| ABSENT.to_string(), describe_route)
        };
        check(
            &format!("dev_server.proxy.{prefix}"),
            route(&left_proxy),
            route(&right_proxy),
        );
    }

    check("plugins", describe_plugins(left), describe_plugins(right));

    drifts
}

fn dev_field(config: &BuildConfig, field: impl Fn(&DevServerConfig) -> String) -> String {
    config
        .dev_server
        .as_ref()
        .map_or_else(|| ABSENT.to_string(), field)
}

fn describe_port(dev: &DevServerConfig) -> String {
    dev.port
        .map_or_else(|| ABSENT.to_string(), |port| port.to_string())
}

fn describe_rules(config: &BuildConfig) -> String {
    config
        .rules
        .iter()
        .map(|rule| {
            let loaders = rule
                .uses
                .iter()
                .map(|u| u.to_string())
                .collect::<Vec<_>>()
                .join(" ! ");
            let mut described = rule.test.to_string();
            if let Some(include) = &rule.include {
                described.push_str(&format!(" include {include}"));
            }
            if let Some(exclude) = &rule.exclude {
                described.push_str(&format!(" exclude {exclude}"));
            }
            format!("{described} -> {loaders}")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A bare target reads as just the origin; options follow it.
fn describe_route(route: &ProxyRoute) -> String {
    let mut described = route.target.clone();
    if route.change_origin {
        described.push_str(" (change origin)");
    }
    if !route.headers.is_empty() {
        let headers = route
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        described.push_str(&format!(" headers [{headers}]"));
    }
    described
}

fn describe_plugins(config: &BuildConfig) -> String {
    config
        .plugins
        .iter()
        .map(|p| match &p.options {
            Some(options) => format!("{}?{options}", p.name),
            None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn lookup(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| ABSENT.to_string())
}

/// Keys of both sides, left order first, without duplicates.
fn union<'a>(
    left: impl Iterator<Item = &'a String>,
    right: impl Iterator<Item = &'a String>,
) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in left.chain(right) {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}
