//! End-to-end assembly tests.
//!
//! Each test declares a handful of endpoints (programmatically or through a
//! manifest), runs [`specforge::DocumentGenerator`] and checks the resulting
//! document.

use std::sync::{Arc, Mutex};

use indoc::indoc;
use pretty_assertions::assert_eq;

use specforge::{
    Annotation, DocumentContext, DocumentGenerator, EndpointDescriptor, EndpointProvider, Error,
    FnDocumentProcessor, FnOperationProcessor, GeneratorSettings, HttpMethod, ManifestProvider,
    MediaTypes, OperationContext, OperationProcessor, OwnerDescriptor, ProcessOutcome,
    ResponseDescriptor, SchemaStore, SchemaType, TypeRef, Value,
};

/// Settings with every built-in processor off, so only the core runs.
fn bare_settings() -> GeneratorSettings {
    GeneratorSettings::new().without_builtin_processors()
}

fn object_type(id: &str) -> TypeRef {
    let schema: Value = serde_yaml_ng::from_str("type: object").unwrap();
    TypeRef::new(id, schema)
}

fn ids(document: &specforge::Document) -> Vec<String> {
    document
        .operations()
        .map(|(_, _, op)| op.operation_id.clone())
        .collect()
}

// --- Core assembly ---

#[test]
fn identifiers_follow_disambiguation_sequence() {
    let foo = OwnerDescriptor::new("app::FooController", "Foo").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&foo, "Bar", "foo/a"),
        EndpointDescriptor::new(&foo, "BarAsync", "foo/b"),
        EndpointDescriptor::new(&foo, "Bar", "foo/c"),
    ];

    let document = DocumentGenerator::new(bare_settings())
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(ids(&document), vec!["Foo_Bar", "Foo_Bar_2", "Foo_Bar3"]);
}

#[test]
fn identifiers_are_unique_across_owners() {
    let first = OwnerDescriptor::new("billing::Users", "Users").shared();
    let second = OwnerDescriptor::new("auth::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&first, "Get", "billing/users"),
        EndpointDescriptor::new(&second, "Get", "auth/users"),
        EndpointDescriptor::new(&second, "Get", "auth/users/{id}"),
    ];

    let document = DocumentGenerator::new(bare_settings())
        .generate_from(endpoints)
        .unwrap();

    let mut all = ids(&document);
    assert_eq!(all, vec!["Users_Get", "Users_Get_2", "Users_Get3"]);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 3);
}

#[test]
fn duplicate_verb_and_path_is_a_conflict() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "List", "users"),
        EndpointDescriptor::new(&users, "Search", "/users"),
    ];

    let err = DocumentGenerator::new(bare_settings())
        .generate_from(endpoints)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::OperationConflict { method: HttpMethod::Get, ref path } if path == "/users"
    ));
}

#[test]
fn paths_are_normalized() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "Get", "users/{id}"),
        EndpointDescriptor::new(&users, "Update", "//users/{id}").method(HttpMethod::Put),
    ];

    let document = DocumentGenerator::new(bare_settings())
        .generate_from(endpoints)
        .unwrap();

    let paths: Vec<&String> = document.paths.keys().collect();
    assert_eq!(paths, vec!["/users/{id}"]);
    let item = &document.paths["/users/{id}"];
    assert!(item.contains(HttpMethod::Get));
    assert!(item.contains(HttpMethod::Put));
}

#[test]
fn shared_media_types_become_document_defaults() {
    let files = OwnerDescriptor::new("app::Files", "Files").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&files, "Upload", "files")
            .method(HttpMethod::Post)
            .consumes(&["application/json", "application/xml"]),
        EndpointDescriptor::new(&files, "Replace", "files/{id}")
            .method(HttpMethod::Put)
            .consumes(&["application/json"]),
    ];

    let document = DocumentGenerator::new(bare_settings())
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(document.consumes, vec!["application/json"]);
    let upload = document.operation("/files", HttpMethod::Post).unwrap();
    assert_eq!(
        upload.consumes,
        MediaTypes::Explicit(vec![
            "application/json".to_string(),
            "application/xml".to_string()
        ])
    );
    let replace = document.operation("/files/{id}", HttpMethod::Put).unwrap();
    assert!(replace.consumes.is_inherited());
}

#[test]
fn template_metadata_survives_defaults() {
    let template = specforge::template_from_str(indoc! {"
        swagger: '2.0'
        info:
          title: Template Title
          version: 3.0.0
        host: api.example.com
        paths:
          /health:
            get:
              operationId: Health_Get
              responses:
                '200':
                  description: OK
    "})
    .unwrap();

    let health = OwnerDescriptor::new("app::Health", "Health").shared();
    let endpoints = vec![EndpointDescriptor::new(&health, "Get", "healthz")];

    let document = DocumentGenerator::new(bare_settings().template(template))
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(document.info.title, "Template Title");
    assert_eq!(document.info.version, "3.0.0");
    assert_eq!(document.host.as_deref(), Some("api.example.com"));
    assert_eq!(document.generator.as_deref(), Some(specforge::GENERATOR_SIGNATURE));
    assert_eq!(ids(&document), vec!["Health_Get", "Health_Get_2"]);
}

#[test]
fn template_operation_blocks_same_verb_and_path() {
    let template = specforge::template_from_str(indoc! {"
        swagger: '2.0'
        info:
          title: T
          version: '1'
        paths:
          /health:
            get:
              operationId: Probe
    "})
    .unwrap();
    let health = OwnerDescriptor::new("app::Health", "Health").shared();

    let err = DocumentGenerator::new(bare_settings().template(template))
        .generate_from(vec![EndpointDescriptor::new(&health, "Get", "health")])
        .unwrap_err();

    assert!(matches!(err, Error::OperationConflict { .. }));
}

#[test]
fn template_path_level_keys_are_kept() {
    let template = specforge::template_from_str(indoc! {"
        openapi: 3.0.3
        info:
          title: Items
          version: '1'
        paths:
          /items/{id}:
            summary: Single item
            parameters:
              - name: id
                in: path
                required: true
                schema:
                  type: string
            get:
              operationId: Items_Get
    "})
    .unwrap();
    let items = OwnerDescriptor::new("app::Items", "Items").shared();

    let document = DocumentGenerator::new(bare_settings().template(template))
        .generate_from(vec![
            EndpointDescriptor::new(&items, "Replace", "items/{id}").method(HttpMethod::Put),
        ])
        .unwrap();

    let item = &document.paths["/items/{id}"];
    assert_eq!(item.len(), 2);
    assert_eq!(item.fields["parameters"][0]["name"].as_str(), Some("id"));
    assert_eq!(
        document.operation("/items/{id}", HttpMethod::Put).unwrap().operation_id,
        "Items_Replace"
    );

    let yaml = specforge::to_yaml(&document).unwrap();
    assert!(yaml.contains("summary: Single item"));
}

#[test]
fn empty_run_applies_defaults() {
    let document = DocumentGenerator::new(bare_settings().title("Pets").description("All pets"))
        .generate_from(Vec::new())
        .unwrap();

    assert_eq!(document.info.title, "Pets");
    assert_eq!(document.info.description.as_deref(), Some("All pets"));
    assert_eq!(document.info.version, specforge::DEFAULT_VERSION);
    assert_eq!(document.swagger.as_deref(), Some("2.0"));
    assert!(document.paths.is_empty());
}

#[test]
fn ignored_owner_and_endpoint_are_skipped() {
    let admin = OwnerDescriptor::new("app::Admin", "Admin")
        .annotate(Annotation::Ignore)
        .shared();
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let used = Arc::new(Mutex::new(Vec::new()));
    let all = Arc::new(Mutex::new(Vec::new()));

    let (used_sink, all_sink) = (Arc::clone(&used), Arc::clone(&all));
    let settings = bare_settings().document_processor(FnDocumentProcessor::new(
        "record-owners",
        move |ctx: &mut DocumentContext<'_>| {
            used_sink
                .lock()
                .unwrap()
                .extend(ctx.used_owners.iter().map(|o| o.id.clone()));
            all_sink
                .lock()
                .unwrap()
                .extend(ctx.all_owners.iter().map(|o| o.id.clone()));
            Ok(())
        },
    ));

    let endpoints = vec![
        EndpointDescriptor::new(&admin, "Purge", "admin/purge").method(HttpMethod::Delete),
        EndpointDescriptor::new(&users, "List", "users"),
        EndpointDescriptor::new(&users, "Internal", "users/internal").annotate(Annotation::Ignore),
    ];

    let document = DocumentGenerator::new(settings)
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(ids(&document), vec!["Users_List"]);
    assert_eq!(*used.lock().unwrap(), vec!["app::Users"]);
    assert_eq!(*all.lock().unwrap(), vec!["app::Admin", "app::Users"]);
}

// --- Pipelines ---

#[test]
fn rejection_removes_owner_from_used_set() {
    let legacy = OwnerDescriptor::new("app::Legacy", "Legacy").shared();
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let used = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&used);
    let settings = bare_settings().document_processor(FnDocumentProcessor::new(
        "record-used",
        move |ctx: &mut DocumentContext<'_>| {
            sink.lock()
                .unwrap()
                .extend(ctx.used_owners.iter().map(|o| o.name.clone()));
            Ok(())
        },
    ));

    let endpoints = vec![
        EndpointDescriptor::new(&legacy, "Old", "legacy").processor(FnOperationProcessor::new(
            "drop",
            |_: &mut OperationContext<'_>| Ok(ProcessOutcome::Reject),
        )),
        EndpointDescriptor::new(&users, "List", "users"),
    ];

    let document = DocumentGenerator::new(settings)
        .generate_from(endpoints)
        .unwrap();

    assert!(document.operation("/legacy", HttpMethod::Get).is_none());
    assert_eq!(*used.lock().unwrap(), vec!["Users"]);
}

#[test]
fn pipeline_runs_global_then_owner_then_endpoint() {
    fn mark(label: &'static str) -> impl OperationProcessor {
        FnOperationProcessor::new(label, move |ctx: &mut OperationContext<'_>| {
            let description = ctx.operation.description.get_or_insert_with(String::new);
            if !description.is_empty() {
                description.push(',');
            }
            description.push_str(label);
            Ok(ProcessOutcome::Accept)
        })
    }

    let owner = OwnerDescriptor::new("app::Users", "Users")
        .processor(mark("owner"))
        .shared();
    let endpoint = EndpointDescriptor::new(&owner, "List", "users").processor(mark("endpoint"));
    let settings = bare_settings().operation_processor(mark("global"));

    let document = DocumentGenerator::new(settings)
        .generate_from(vec![endpoint])
        .unwrap();

    let op = document.operation("/users", HttpMethod::Get).unwrap();
    assert_eq!(op.description.as_deref(), Some("global,owner,endpoint"));
}

#[test]
fn first_rejection_short_circuits() {
    let calls = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&calls);

    let owner = OwnerDescriptor::new("app::Users", "Users")
        .processor(FnOperationProcessor::new(
            "reject",
            |_: &mut OperationContext<'_>| Ok(ProcessOutcome::Reject),
        ))
        .shared();
    let endpoint = EndpointDescriptor::new(&owner, "List", "users").processor(
        FnOperationProcessor::new("count", move |_: &mut OperationContext<'_>| {
            *counter.lock().unwrap() += 1;
            Ok(ProcessOutcome::Accept)
        }),
    );

    let document = DocumentGenerator::new(bare_settings())
        .generate_from(vec![endpoint])
        .unwrap();

    assert!(document.paths.is_empty());
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn document_changes_before_rejection_are_kept() {
    let settings = bare_settings().operation_processor(FnOperationProcessor::new(
        "register-then-reject",
        |ctx: &mut OperationContext<'_>| {
            ctx.resolve_schema(&object_type("app::Audit"))?;
            Ok(ProcessOutcome::Reject)
        },
    ));
    let owner = OwnerDescriptor::new("app::Users", "Users").shared();

    let document = DocumentGenerator::new(settings)
        .generate_from(vec![EndpointDescriptor::new(&owner, "List", "users")])
        .unwrap();

    assert!(document.paths.is_empty());
    assert!(document.definitions.contains_key("Audit"));
}

#[test]
fn processors_see_group_snapshot() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let settings = bare_settings().operation_processor(FnOperationProcessor::new(
        "snapshot",
        move |ctx: &mut OperationContext<'_>| {
            sink.lock().unwrap().push(ctx.group_operations.len());
            Ok(ProcessOutcome::Accept)
        },
    ));

    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let orders = OwnerDescriptor::new("app::Orders", "Orders").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "List", "users"),
        EndpointDescriptor::new(&users, "Get", "users/{id}"),
        EndpointDescriptor::new(&orders, "List", "orders"),
    ];

    DocumentGenerator::new(settings)
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![2, 2, 1]);
}

#[test]
fn rewritten_identifier_is_kept_unique() {
    let settings = bare_settings().operation_processor(FnOperationProcessor::new(
        "rename",
        |ctx: &mut OperationContext<'_>| {
            ctx.operation.operation_id = "Same".to_string();
            Ok(ProcessOutcome::Accept)
        },
    ));
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "List", "users"),
        EndpointDescriptor::new(&users, "Get", "users/{id}"),
    ];

    let document = DocumentGenerator::new(settings)
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(ids(&document), vec!["Same", "Same_2"]);
}

#[test]
fn processor_error_aborts_the_run() {
    let settings = bare_settings().operation_processor(FnOperationProcessor::new(
        "fail",
        |ctx: &mut OperationContext<'_>| {
            Err(Error::Processor {
                processor: "fail".to_string(),
                message: format!("cannot document {}", ctx.handler()),
            })
        },
    ));
    let users = OwnerDescriptor::new("app::Users", "Users").shared();

    let err = DocumentGenerator::new(settings)
        .generate_from(vec![EndpointDescriptor::new(&users, "List", "users")])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "processor 'fail' failed: cannot document app::Users.List"
    );
}

#[test]
fn post_process_hook_runs_last() {
    let settings = bare_settings()
        .document_processor(FnDocumentProcessor::new(
            "title",
            |ctx: &mut DocumentContext<'_>| {
                ctx.document.info.title = "From processor".to_string();
                Ok(())
            },
        ))
        .post_process(|document| {
            document.info.title.push_str(" and hook");
        });

    let document = DocumentGenerator::new(settings)
        .generate_from(Vec::new())
        .unwrap();

    assert_eq!(document.info.title, "From processor and hook");
}

#[test]
fn group_filter_drops_other_groups() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "List", "users").group("public"),
        EndpointDescriptor::new(&users, "Purge", "users/purge")
            .group("admin")
            .method(HttpMethod::Delete),
        EndpointDescriptor::new(&users, "Count", "users/count"),
    ];

    let document = DocumentGenerator::new(bare_settings().group_names(&["public"]))
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(ids(&document), vec!["Users_List"]);
}

// --- Schema resolution ---

#[test]
fn schema_references_are_reused() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![
        EndpointDescriptor::new(&users, "List", "users")
            .response(ResponseDescriptor::new("200").body(object_type("app::User"))),
        EndpointDescriptor::new(&users, "Get", "users/{id}")
            .response(ResponseDescriptor::new("200").body(object_type("app::User"))),
    ];

    let document = DocumentGenerator::default()
        .generate_from(endpoints)
        .unwrap();

    assert_eq!(document.definitions.len(), 1);
    for path in ["/users", "/users/{id}"] {
        let op = document.operation(path, HttpMethod::Get).unwrap();
        assert_eq!(
            op.responses["200"]["schema"]["$ref"].as_str(),
            Some("#/definitions/User")
        );
    }
}

#[test]
fn reused_schema_store_keeps_every_document_complete() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoints = vec![EndpointDescriptor::new(&users, "List", "users")
        .response(ResponseDescriptor::new("200").body(object_type("app::User")))];
    let generator = DocumentGenerator::default();
    let mut store = SchemaStore::new();

    let first = generator.generate_with(endpoints.clone(), &mut store).unwrap();
    let second = generator.generate_with(endpoints, &mut store).unwrap();

    for document in [&first, &second] {
        let op = document.operation("/users", HttpMethod::Get).unwrap();
        assert_eq!(
            op.responses["200"]["schema"]["$ref"].as_str(),
            Some("#/definitions/User")
        );
        assert!(document.definitions.contains_key("User"));
    }
}

#[test]
fn schema_failure_aborts_the_run() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let endpoint = EndpointDescriptor::new(&users, "List", "users")
        .response(ResponseDescriptor::new("200").body(TypeRef::new("app::Opaque", Value::Null)));

    let err = DocumentGenerator::default()
        .generate_from(vec![endpoint])
        .unwrap_err();

    assert!(matches!(err, Error::SchemaResolution { ref type_id, .. } if type_id == "app::Opaque"));
}

// --- Built-in processors through a manifest ---

const PETS_MANIFEST: &str = indoc! {"
    owners:
      - id: app::PetsController
        name: Pets
        annotations:
          description: Everything about pets
          api_versions: ['1', '2']
        endpoints:
          - action: GetAsync
            route: api/v{version:apiVersion}/pets/{id}
            parameters:
              - name: version
                in: path
              - name: id
                in: path
                type: { id: i64, schema: { type: integer, format: int64 } }
              - name: fields
                in: query
                description: Fields to include
            responses:
              - status: 200
                content_types: [application/json]
                type:
                  id: app::Pet
                  schema: { type: object, properties: { name: { type: string } } }
              - status: 404
          - action: Create
            route: api/v{version:apiVersion}/pets
            method: post
            consumes: [application/json]
            request_body: { id: app::Pet, schema: { type: object } }
            annotations:
              summary: Add a pet
            responses:
              - status: 201
                content_types: [application/json]
                type: { id: app::Pet, schema: { type: object } }
          - action: Legacy
            route: api/v{version:apiVersion}/pets/legacy
            annotations:
              api_versions: ['0']
      - id: app::StatusController
        name: Status
        annotations:
          allow_anonymous: true
          tags: [Operations]
        endpoints:
          - action: Ping
            route: status
"};

#[test]
fn manifest_endpoints_are_discovered() {
    let provider = ManifestProvider::from_str(PETS_MANIFEST).unwrap();
    let endpoints = provider.discover().unwrap();
    assert_eq!(endpoints.len(), 4);
}

#[test]
fn builtin_processors_for_swagger2() {
    let provider = ManifestProvider::from_str(PETS_MANIFEST).unwrap();
    let settings = GeneratorSettings::new()
        .title("Pets")
        .api_versions(&["2"])
        .add_security(true);

    let document = DocumentGenerator::new(settings)
        .generate(&provider)
        .unwrap();

    let paths: Vec<&str> = document.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/api/v2/pets/{id}", "/api/v2/pets", "/status"]);

    // Path parameter type is inlined; the substituted version parameter is gone.
    let get = document.operation("/api/v2/pets/{id}", HttpMethod::Get).unwrap();
    assert_eq!(get.operation_id, "Pets_Get");
    assert_eq!(get.parameters.len(), 2);
    assert_eq!(get.parameters[0]["name"].as_str(), Some("id"));
    assert_eq!(get.parameters[0]["required"].as_bool(), Some(true));
    assert_eq!(get.parameters[0]["type"].as_str(), Some("integer"));
    assert_eq!(get.parameters[1]["in"].as_str(), Some("query"));
    assert_eq!(get.parameters[1]["required"].as_bool(), Some(false));
    assert_eq!(get.parameters[1]["type"].as_str(), Some("string"));
    assert_eq!(
        get.responses["200"]["schema"]["$ref"].as_str(),
        Some("#/definitions/Pet")
    );
    assert_eq!(get.responses["404"]["description"].as_str(), Some("Not Found"));
    assert_eq!(get.tags, vec!["Pets"]);

    // Body parameter for Swagger 2.0.
    let create = document.operation("/api/v2/pets", HttpMethod::Post).unwrap();
    assert_eq!(create.summary.as_deref(), Some("Add a pet"));
    let body = &create.parameters[0];
    assert_eq!(body["in"].as_str(), Some("body"));
    assert_eq!(body["schema"]["$ref"].as_str(), Some("#/definitions/Pet"));

    // Anonymous owner gets an empty security override and its own tag.
    let ping = document.operation("/status", HttpMethod::Get).unwrap();
    assert_eq!(ping.security, Some(Vec::new()));
    assert_eq!(ping.tags, vec!["Operations"]);
    assert_eq!(
        ping.responses["200"]["description"].as_str(),
        Some("Success")
    );

    // Document-level tags, schema store and security scheme.
    let tags: Vec<(&str, Option<&str>)> = document
        .tags
        .iter()
        .map(|t| (t.name.as_str(), t.description.as_deref()))
        .collect();
    assert_eq!(
        tags,
        vec![("Pets", Some("Everything about pets")), ("Operations", None)]
    );
    assert_eq!(document.definitions.len(), 1);
    assert!(document.security_definitions.contains_key("bearerAuth"));
    assert_eq!(document.security.len(), 1);

    // Every operation produces JSON except the ping, so nothing is shared.
    assert!(document.produces.is_empty());
}

#[test]
fn builtin_processors_for_openapi3() {
    let provider = ManifestProvider::from_str(PETS_MANIFEST).unwrap();
    let settings = GeneratorSettings::new().schema_type(SchemaType::OpenApi3);

    let document = DocumentGenerator::new(settings)
        .generate(&provider)
        .unwrap();

    assert_eq!(document.openapi.as_deref(), Some("3.0.0"));

    // Without a version filter the placeholder stays in the path.
    let create = document
        .operation("/api/v{version:apiVersion}/pets", HttpMethod::Post)
        .unwrap();
    let request_body = create.request_body.as_ref().unwrap();
    assert_eq!(
        request_body["content"]["application/json"]["schema"]["$ref"].as_str(),
        Some("#/components/schemas/Pet")
    );
    assert_eq!(
        create.responses["201"]["content"]["application/json"]["schema"]["$ref"].as_str(),
        Some("#/components/schemas/Pet")
    );

    let get = document
        .operation("/api/v{version:apiVersion}/pets/{id}", HttpMethod::Get)
        .unwrap();
    assert_eq!(get.parameters.len(), 3);
    assert_eq!(get.parameters[1]["schema"]["type"].as_str(), Some("integer"));
    assert!(document.components.schemas.contains_key("Pet"));

    // Legacy endpoint survives without a version filter.
    assert!(document
        .operation("/api/v{version:apiVersion}/pets/legacy", HttpMethod::Get)
        .is_some());

    // No security appender by default.
    assert!(document.components.security_schemes.is_empty());
    assert!(document.security.is_empty());

    let yaml = specforge::to_yaml(&document).unwrap();
    assert!(!yaml.contains("consumes"));
}

#[test]
fn version_filter_drops_unlisted_versions() {
    let provider = ManifestProvider::from_str(PETS_MANIFEST).unwrap();
    let settings = GeneratorSettings::new().api_versions(&["0"]);

    let document = DocumentGenerator::new(settings)
        .generate(&provider)
        .unwrap();

    // Only the legacy endpoint declares version 0; the unversioned status
    // endpoint is always kept.
    let paths: Vec<&str> = document.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/api/v0/pets/legacy", "/status"]);
}

#[test]
fn output_is_deterministic() {
    let provider = ManifestProvider::from_str(PETS_MANIFEST).unwrap();
    let generator = DocumentGenerator::new(GeneratorSettings::new().title("Pets"));

    let first = specforge::to_yaml(&generator.generate(&provider).unwrap()).unwrap();
    let second = specforge::to_yaml(&generator.generate(&provider).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn minimal_document_renders_as_yaml() {
    let users = OwnerDescriptor::new("app::Users", "Users").shared();
    let settings = bare_settings()
        .title("Users API")
        .version("1.0")
        .generator("specforge-test");

    let document = DocumentGenerator::new(settings)
        .generate_from(vec![EndpointDescriptor::new(&users, "ListAsync", "users")
            .consumes(&["application/json"])])
        .unwrap();

    assert_eq!(
        specforge::to_yaml(&document).unwrap(),
        indoc! {"
            swagger: '2.0'
            x-generator: specforge-test
            info:
              title: Users API
              version: '1.0'
            consumes:
            - application/json
            paths:
              /users:
                get:
                  operationId: Users_List
        "}
    );
}
