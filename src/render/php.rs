//! Default renderer: PSR-12-style PHP data classes extending
//! `Spatie\LaravelData\Data`.

use std::collections::BTreeSet;

use crate::model::{Accessor, ClassModel, FieldSpec, PropertyType, Scalar};
use crate::render::{namespace_to_path, RenderedClass, Renderer};

const BASE_CLASS: &str = r"Spatie\LaravelData\Data";
const CARBON: &str = r"Illuminate\Support\Carbon";
const MAP_NAME: &str = r"Spatie\LaravelData\Attributes\MapName";
const DATA_COLLECTION: &str = r"Spatie\LaravelData\DataCollection";
const DATA_COLLECTION_OF: &str = r"Spatie\LaravelData\Attributes\DataCollectionOf";

#[derive(Debug, Default)]
pub struct PhpRenderer;

impl PhpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PhpRenderer {
    fn render(&self, class: &ClassModel) -> RenderedClass {
        let path = format!("{}/{}.php", namespace_to_path(&class.namespace), class.name);

        let mut out = String::new();
        out.push_str("<?php\n\n");
        out.push_str("declare(strict_types=1);\n\n");
        out.push_str(&format!("namespace {};\n\n", class.namespace));

        for import in imports(class) {
            out.push_str(&format!("use {import};\n"));
        }
        out.push('\n');

        out.push_str(&format!("class {} extends Data\n{{\n", class.name));

        let mut members: Vec<String> = class.fields.iter().map(property).collect();
        for method in &class.methods {
            let Some(field) = class.fields.iter().find(|f| f.name == method.field) else {
                continue;
            };
            members.push(match method.kind {
                Accessor::Setter => setter(&method.name, field),
                Accessor::Getter => getter(&method.name, field),
            });
        }
        out.push_str(&members.join("\n"));

        out.push_str("}\n");

        RenderedClass { path, source: out }
    }
}

/// Sorted import set for one class. Referenced classes live in the same
/// namespace, so only the framework types are imported.
fn imports(class: &ClassModel) -> BTreeSet<String> {
    let mut imports = BTreeSet::from([BASE_CLASS.to_string()]);
    for field in &class.fields {
        match &field.ty {
            PropertyType::Date => {
                imports.insert(CARBON.to_string());
            }
            PropertyType::ScalarList { items } if items.contains(&Scalar::Date) => {
                imports.insert(CARBON.to_string());
            }
            PropertyType::Collection { .. } => {
                imports.insert(DATA_COLLECTION.to_string());
                imports.insert(DATA_COLLECTION_OF.to_string());
            }
            _ => {}
        }
        if field.needs_remap() {
            imports.insert(MAP_NAME.to_string());
        }
    }
    imports
}

/// Short type declaration and whether it takes a `?` nullability marker
/// (`mixed` already covers null and rejects the marker).
fn php_type(ty: &PropertyType) -> (&str, bool) {
    match ty {
        PropertyType::Unknown => ("mixed", false),
        PropertyType::Bool => ("bool", true),
        PropertyType::Int => ("int", true),
        PropertyType::Float => ("float", true),
        PropertyType::String => ("string", true),
        PropertyType::Date => ("Carbon", true),
        PropertyType::Class { name } => (name.as_str(), true),
        PropertyType::Collection { .. } => ("DataCollection", true),
        PropertyType::ScalarList { .. } | PropertyType::UntypedArray => ("array", true),
    }
}

fn type_declaration(ty: &PropertyType) -> String {
    let (name, nullable) = php_type(ty);
    if nullable { format!("?{name}") } else { name.to_string() }
}

fn scalar_php_name(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "bool",
        Scalar::Int => "int",
        Scalar::Float => "float",
        Scalar::String => "string",
        Scalar::Date => "Carbon",
    }
}

fn property(field: &FieldSpec) -> String {
    let mut out = String::new();

    match &field.ty {
        PropertyType::ScalarList { items } => {
            let union: Vec<&str> = items.iter().map(|s| scalar_php_name(*s)).collect();
            out.push_str(&format!("    /** @var array<int, {}> */\n", union.join("|")));
        }
        PropertyType::Collection { name } => {
            out.push_str(&format!("    /** @var DataCollection<{name}> */\n"));
        }
        _ => {}
    }

    if field.needs_remap() {
        out.push_str(&format!("    #[MapName('{}')]\n", field.raw_key));
    }
    if let PropertyType::Collection { name } = &field.ty {
        out.push_str(&format!("    #[DataCollectionOf({name}::class)]\n"));
    }

    out.push_str(&format!(
        "    public {} ${} = null;\n",
        type_declaration(&field.ty),
        field.name
    ));
    out
}

fn setter(name: &str, field: &FieldSpec) -> String {
    let ty = type_declaration(&field.ty);
    let var = &field.name;
    format!(
        "    public function {name}({ty} ${var}): ?self\n    {{\n        \
         $this->{var} = ${var};\n\n        return $this;\n    }}\n"
    )
}

fn getter(name: &str, field: &FieldSpec) -> String {
    let ty = type_declaration(&field.ty);
    let var = &field.name;
    format!(
        "    public function {name}(): {ty}\n    {{\n        return $this->{var};\n    }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::ident::Casing;
    use crate::infer::generate;
    use serde_json::json;

    fn render_all(document: serde_json::Value, config: GeneratorConfig) -> Vec<RenderedClass> {
        let generation = generate(&document, config).unwrap();
        PhpRenderer::new().render_all(&generation.classes)
    }

    #[test]
    fn simple_class_renders_complete_source() {
        let rendered = render_all(json!({"id": 1, "name": "Alice"}), GeneratorConfig::default());

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].path, "app/Data/RootData.php");
        assert_eq!(
            rendered[0].source,
            "<?php\n\
             \n\
             declare(strict_types=1);\n\
             \n\
             namespace App\\Data;\n\
             \n\
             use Spatie\\LaravelData\\Data;\n\
             \n\
             class RootData extends Data\n\
             {\n\
             \x20   public ?int $id = null;\n\
             \n\
             \x20   public ?string $name = null;\n\
             }\n"
        );
    }

    #[test]
    fn remapped_fields_carry_the_map_name_attribute() {
        let rendered = render_all(
            json!({"user_name": "Alice"}),
            GeneratorConfig::builder().casing(Casing::Camel).build(),
        );
        let source = &rendered[0].source;
        assert!(source.contains("use Spatie\\LaravelData\\Attributes\\MapName;"));
        assert!(source.contains("    #[MapName('user_name')]\n    public ?string $userName = null;"));
    }

    #[test]
    fn collections_reference_the_element_class() {
        let rendered = render_all(
            json!({"users": [{"id": 1}, {"id": 2, "x": "y"}]}),
            GeneratorConfig::default(),
        );

        let root = rendered.iter().find(|r| r.path.ends_with("RootData.php")).unwrap();
        assert!(root.source.contains("use Spatie\\LaravelData\\DataCollection;"));
        assert!(root.source.contains("    /** @var DataCollection<UserData> */"));
        assert!(root.source.contains("    #[DataCollectionOf(UserData::class)]"));
        assert!(root.source.contains("    public ?DataCollection $users = null;"));

        let element = rendered.iter().find(|r| r.path.ends_with("UserData.php")).unwrap();
        assert!(element.source.contains("class UserData extends Data"));
    }

    #[test]
    fn scalar_lists_and_unknowns_render_as_arrays_and_mixed() {
        let rendered = render_all(
            json!({"tags": ["a", 1], "nothing": null, "blob": []}),
            GeneratorConfig::default(),
        );
        let source = &rendered[0].source;
        assert!(source.contains("    /** @var array<int, int|string> */\n    public ?array $tags = null;"));
        assert!(source.contains("    public mixed $nothing = null;"));
        assert!(source.contains("    public ?array $blob = null;"));
    }

    #[test]
    fn date_fields_import_carbon() {
        let rendered = render_all(
            json!({"born": "2024-01-05"}),
            GeneratorConfig::builder().detect_dates(true).build(),
        );
        let source = &rendered[0].source;
        assert!(source.contains("use Illuminate\\Support\\Carbon;"));
        assert!(source.contains("    public ?Carbon $born = null;"));
    }

    #[test]
    fn accessors_render_bodies() {
        let rendered = render_all(
            json!({"id": 1}),
            GeneratorConfig::builder().getters(true).setters(true).build(),
        );
        let source = &rendered[0].source;
        assert!(source.contains(
            "    public function setId(?int $id): ?self\n    {\n        $this->id = $id;\n\n        return $this;\n    }\n"
        ));
        assert!(source.contains(
            "    public function getId(): ?int\n    {\n        return $this->id;\n    }\n"
        ));
    }
}
