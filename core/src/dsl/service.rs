use std::panic::Location;

use crate::eval::{Eval, RootDecl};
use crate::expr::{
    ApiExpr, AttributeExpr, CallSite, DataType, ErrorExpr, ExprId, ExprKind, Expression,
    FileServerExpr, MetaMap, MethodExpr, ResponseExpr, RouteExpr, ServerExpr, ServiceExpr,
    ServiceRef, Verb,
};

impl Eval {
    /// Declare the API. A design has at most one.
    #[track_caller]
    pub fn api(&mut self, name: &str, block: impl FnOnce(&mut Eval)) -> Option<ExprId> {
        let location = Location::caller();
        let decl = self.declare_root("api", ExprKind::Api, name, location, |_| {
            Expression::Api(ApiExpr {
                name: name.to_string(),
                title: None,
                description: None,
                version: None,
                servers: Vec::new(),
                meta: MetaMap::default(),
                location,
            })
        })?;
        match decl {
            RootDecl::New(id) => {
                self.execute(id, block);
                Some(id)
            }
            RootDecl::Duplicate(id) => Some(id),
        }
    }

    #[track_caller]
    pub fn title(&mut self, title: &str) {
        let location = Location::caller();
        if let Some(id) = self.receiver("title", location, |e| matches!(e, Expression::Api(_))) {
            if let Expression::Api(api) = self.arena.get_mut(id) {
                api.title = Some(title.to_string());
            }
        }
    }

    #[track_caller]
    pub fn version(&mut self, version: &str) {
        let location = Location::caller();
        if let Some(id) = self.receiver("version", location, |e| matches!(e, Expression::Api(_))) {
            if let Expression::Api(api) = self.arena.get_mut(id) {
                api.version = Some(version.to_string());
            }
        }
    }

    /// Declare a server of the API.
    #[track_caller]
    pub fn server(&mut self, name: &str, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        let Some(api) = self.receiver("server", location, |e| matches!(e, Expression::Api(_)))
        else {
            return;
        };
        let id = self.alloc(Expression::Server(ServerExpr {
            name: name.to_string(),
            description: None,
            hosts: Vec::new(),
            services: Vec::new(),
            meta: MetaMap::default(),
            location,
        }));
        if let Expression::Api(e) = self.arena.get_mut(api) {
            e.servers.push(id);
        }
        self.execute(id, block);
    }

    #[track_caller]
    pub fn host(&mut self, uri: &str) {
        let location = Location::caller();
        if let Some(id) = self.receiver("host", location, |e| matches!(e, Expression::Server(_))) {
            if let Expression::Server(server) = self.arena.get_mut(id) {
                server.hosts.push(uri.to_string());
            }
        }
    }

    /// Name the services a server hosts. Names are resolved when the design
    /// is prepared, so services may be declared later.
    #[track_caller]
    pub fn services<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let location = Location::caller();
        if let Some(id) = self.receiver("services", location, |e| {
            matches!(e, Expression::Server(_))
        }) {
            if let Expression::Server(server) = self.arena.get_mut(id) {
                server.services.extend(names.into_iter().map(|name| ServiceRef {
                    name: name.into(),
                    service: None,
                }));
            }
        }
    }

    /// Declare a service.
    #[track_caller]
    pub fn service(&mut self, name: &str, block: impl FnOnce(&mut Eval)) -> Option<ExprId> {
        let location = Location::caller();
        let decl = self.declare_root("service", ExprKind::Service, name, location, |_| {
            Expression::Service(ServiceExpr {
                name: name.to_string(),
                description: None,
                methods: Vec::new(),
                file_servers: Vec::new(),
                meta: MetaMap::default(),
                location,
            })
        })?;
        match decl {
            RootDecl::New(id) => {
                self.execute(id, block);
                Some(id)
            }
            RootDecl::Duplicate(id) => Some(id),
        }
    }

    #[track_caller]
    pub fn method(&mut self, name: &str, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        let Some(service) =
            self.receiver("method", location, |e| matches!(e, Expression::Service(_)))
        else {
            return;
        };
        let id = self.alloc(Expression::Method(MethodExpr {
            name: name.to_string(),
            description: None,
            service,
            payload: None,
            result: None,
            errors: Vec::new(),
            routes: Vec::new(),
            responses: Vec::new(),
            meta: MetaMap::default(),
            location,
        }));
        if let Expression::Service(e) = self.arena.get_mut(service) {
            e.methods.push(id);
        }
        self.execute(id, block);
    }

    /// Serve the file or directory at `file_path` under `request_path`.
    #[track_caller]
    pub fn files(&mut self, request_path: &str, file_path: &str, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        let Some(service) =
            self.receiver("files", location, |e| matches!(e, Expression::Service(_)))
        else {
            return;
        };
        let id = self.alloc(Expression::FileServer(FileServerExpr {
            request_path: request_path.to_string(),
            file_path: file_path.to_string(),
            description: None,
            service,
            meta: MetaMap::default(),
            location,
        }));
        if let Expression::Service(e) = self.arena.get_mut(service) {
            e.file_servers.push(id);
        }
        self.execute(id, block);
    }

    /// Declare the method payload. Fields declared in `block` make it an
    /// inline object.
    #[track_caller]
    pub fn payload(&mut self, data_type: impl Into<DataType>, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        self.method_data("payload", location, data_type.into(), block, |m, id| {
            m.payload = Some(id)
        });
    }

    /// Declare the method result.
    #[track_caller]
    pub fn result(&mut self, data_type: impl Into<DataType>, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        self.method_data("result", location, data_type.into(), block, |m, id| {
            m.result = Some(id)
        });
    }

    fn method_data(
        &mut self,
        call: &'static str,
        location: CallSite,
        data_type: DataType,
        block: impl FnOnce(&mut Eval),
        set: impl FnOnce(&mut MethodExpr, ExprId),
    ) {
        let Some(method) = self.receiver(call, location, |e| matches!(e, Expression::Method(_)))
        else {
            return;
        };
        let id = self.alloc(Expression::Attribute(AttributeExpr::new(
            None, data_type, location,
        )));
        if let Expression::Method(m) = self.arena.get_mut(method) {
            set(m, id);
        }
        self.execute(id, block);
    }

    /// Declare a named error the method may return.
    #[track_caller]
    pub fn error(
        &mut self,
        name: &str,
        data_type: impl Into<DataType>,
        block: impl FnOnce(&mut Eval),
    ) {
        let location = Location::caller();
        let Some(method) = self.receiver("error", location, |e| matches!(e, Expression::Method(_)))
        else {
            return;
        };
        let attribute = self.alloc(Expression::Attribute(AttributeExpr::new(
            None,
            data_type.into(),
            location,
        )));
        let id = self.alloc(Expression::Error(ErrorExpr {
            name: name.to_string(),
            attribute,
            location,
        }));
        if let Expression::Method(m) = self.arena.get_mut(method) {
            m.errors.push(id);
        }
        self.execute(id, block);
    }

    /// Declare an HTTP route for the method.
    #[track_caller]
    pub fn route(&mut self, verb: Verb, path: &str, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        let Some(method) = self.receiver("route", location, |e| matches!(e, Expression::Method(_)))
        else {
            return;
        };
        let id = self.alloc(Expression::Route(RouteExpr {
            verb,
            path: path.to_string(),
            method,
            meta: MetaMap::default(),
            location,
        }));
        if let Expression::Method(m) = self.arena.get_mut(method) {
            m.routes.push(id);
        }
        self.execute(id, block);
    }

    /// Declare an HTTP response. Attributes declared in `block` describe the
    /// response body.
    #[track_caller]
    pub fn response(&mut self, status: u16, block: impl FnOnce(&mut Eval)) {
        let location = Location::caller();
        let Some(method) =
            self.receiver("response", location, |e| matches!(e, Expression::Method(_)))
        else {
            return;
        };
        let body = self.alloc(Expression::Attribute(AttributeExpr::new(
            None,
            DataType::Empty,
            location,
        )));
        let id = self.alloc(Expression::Response(ResponseExpr {
            status,
            description: None,
            body,
            meta: MetaMap::default(),
            location,
        }));
        if let Expression::Method(m) = self.arena.get_mut(method) {
            m.responses.push(id);
        }
        self.execute(id, block);
    }
}
