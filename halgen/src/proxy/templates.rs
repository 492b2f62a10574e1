//! Built-in proxy templates and the template registry
//!
//! Each flavor has one Handlebars template. Templates receive the context
//! built by [`ProxyGenerator`](super::ProxyGenerator):
//!
//! | key                   | meaning                                         |
//! |-----------------------|-------------------------------------------------|
//! | `class_name`          | generated class name                            |
//! | `properties`          | `name`, `getter`, `setter`, `property_type`,    |
//! |                       | `signal_name`, `decorate_setter`                |
//! | `methods`             | `name`, `params`, `call_args`                   |
//! | `use_property_syntax` | `@property` accessors instead of `get_`/`set_`  |
//! | `service_port`        | default `--service-port`                        |
//! | `service_host`        | default `--service-ip`, quoted                  |
//! | `window_title`        | console title for the service, quoted, optional |
//!
//! Quoted values are complete Python string literals (`"127.0.0.1"`), so
//! templates place them without surrounding quotes.
//!
//! A missing getter or setter only drops its block; no template fails on it.

use crate::config::Flavor;
use crate::error::Result;
use handlebars::Handlebars;
use std::path::Path;

/// Extension of template override files (`plain.py.hbs`, ...)
pub const TEMPLATE_EXTENSION: &str = "py.hbs";

/// Plain property proxy
pub const PLAIN_PROXY_TEMPLATE: &str = r"class {{class_name}}(object):
    def __init__(self):
        self.target = None

    # property definitions
{{#each properties}}
{{#if getter}}
{{#if @root.use_property_syntax}}
    @property
    def {{name}}(self):
{{else}}
    def get_{{name}}(self):
{{/if}}
        return self.target.{{getter.name}}()

{{/if}}
{{#if setter}}
{{#if decorate_setter}}
    @{{name}}.setter
    def {{name}}(self, value):
{{else}}
    def set_{{name}}(self, value):
{{/if}}
        self.target.{{setter.name}}(value)

{{/if}}
{{/each}}
    # method definitions
{{#each methods}}
    def {{name}}({{params}}):
        pass

{{/each}}
";

/// GUI-bound proxy with one change signal per property
pub const QT_PROXY_TEMPLATE: &str = r"from PyQt5.QtCore import QObject, pyqtSignal


class {{class_name}}(QObject):
{{#each properties}}
    {{signal_name}} = pyqtSignal({{property_type}})
{{/each}}

    def __init__(self, parent=None):
        QObject.__init__(self, parent=parent)
        self.target = None

    # property definitions
{{#each properties}}
{{#if getter}}
    def {{name}}(self):
        return self.target.{{getter.name}}()

{{/if}}
{{#if setter}}
    def set_{{name}}(self, value):
        self.target.{{setter.name}}(value)
        self.{{signal_name}}.emit(value)

{{/if}}
{{/each}}
    # method definitions
{{#each methods}}
    def {{name}}({{params}}):
        return self.target.{{name}}({{call_args}})

{{/each}}
";

/// Standalone JSON-RPC service over a ZeroMQ transport
pub const SERVICE_TEMPLATE: &str = r#"import argparse
{{#if window_title}}
from os import system
{{/if}}

import zmq

from tinyrpc.dispatch import RPCDispatcher, public
from tinyrpc.protocols.jsonrpc import JSONRPCProtocol
from tinyrpc.server import RPCServer
from tinyrpc.transports.zmq import ZmqServerTransport


class {{class_name}}(object):
    def __init__(self):
        self.target = None

    # property definitions
{{#each properties}}
{{#if getter}}
    @public
    def get_{{name}}(self):
        return self.target.{{getter.name}}()

{{/if}}
{{#if setter}}
    @public
    def set_{{name}}(self, value):
        self.target.{{setter.name}}(value)

{{/if}}
{{/each}}
    # method definitions
{{#each methods}}
    def {{name}}({{params}}):
        pass

{{/each}}

if __name__ == "__main__":
{{#if window_title}}
    system("title " + {{window_title}})

{{/if}}
    parser = argparse.ArgumentParser(description="{{class_name}} remote procedure service")
    parser.add_argument("--service-port", "-p", dest="servicePort", type=int, default={{service_port}})
    parser.add_argument("--service-ip", dest="serviceIP", type=str, default={{service_host}})
    args = parser.parse_args()

    ctx = zmq.Context()
    service = {{class_name}}()

    dispatcher = RPCDispatcher()
    dispatcher.register_instance(service)

    endpoint = "tcp://%s:%i" % (args.serviceIP, args.servicePort)
    transport = ZmqServerTransport.create(ctx, endpoint)
    print("serving requests at %s" % endpoint)

    rpc_server = RPCServer(transport, JSONRPCProtocol(), dispatcher)
    rpc_server.serve_forever()
"#;

/// Registry holding one compiled template per flavor
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Register the built-in templates
    ///
    /// When `override_dir` contains `<flavor>.py.hbs`, that file is used
    /// instead of the built-in template for the flavor.
    ///
    /// # Errors
    ///
    /// Returns an error if an override file cannot be read or any template
    /// fails to parse.
    pub fn new(override_dir: Option<&Path>) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        for flavor in Flavor::ALL {
            let custom = override_dir
                .map(|dir| dir.join(format!("{}.{TEMPLATE_EXTENSION}", flavor.name())))
                .filter(|path| path.is_file());

            match custom {
                Some(path) => {
                    tracing::debug!(flavor = flavor.name(), path = %path.display(), "using template override");
                    let source = std::fs::read_to_string(&path)?;
                    handlebars.register_template_string(flavor.name(), source)?;
                }
                None => {
                    handlebars.register_template_string(flavor.name(), Self::builtin(flavor))?;
                }
            }
        }

        Ok(Self { handlebars })
    }

    /// Built-in template source for a flavor
    #[must_use]
    pub const fn builtin(flavor: Flavor) -> &'static str {
        match flavor {
            Flavor::Plain => PLAIN_PROXY_TEMPLATE,
            Flavor::Qt => QT_PROXY_TEMPLATE,
            Flavor::Service => SERVICE_TEMPLATE,
        }
    }

    /// Render the template of `flavor` with `context`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&self, flavor: Flavor, context: &serde_json::Value) -> Result<String> {
        Ok(self.handlebars.render(flavor.name(), context)?)
    }
}
