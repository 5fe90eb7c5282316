use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use stucco_carton::Codes;

use super::*;

fn transform(source: &str) -> MacroTransformResult {
    transform_with(source, &MacroOptions::default())
}

fn transform_with(source: &str, options: &MacroOptions) -> MacroTransformResult {
    transform_jsx_macros(source, "test.tsx", options).expect("source should parse")
}

fn root(result: &MacroTransformResult, id: u32) -> &JsxMacros {
    result
        .root_map
        .get(Some(RootId(id)))
        .unwrap_or_else(|| panic!("no entry for root {id}"))
}

mod model {
    use super::*;

    #[test]
    fn test_variable_model() {
        let result = transform(
            "const Comp = () => {\n  const value = defineModel<string>()\n  return <input />\n}",
        );
        assert_eq!(
            result.code,
            "const Comp = () => {\n  const value = // @ts-ignore\n___MACROS_model_modelValue;\nlet ___MACROS_model_modelValue = defineModel<string>()\n  return <input />\n}"
        );
        assert_eq!(
            root(&result, 0).define_model,
            vec![
                "modelValue?: import('vue').UnwrapRef<typeof ___MACROS_model_modelValue>"
                    .to_string(),
                "'onUpdate:modelValue'?: ($event: import('vue').UnwrapRef<typeof ___MACROS_model_modelValue>) => any"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_required_adds_option_property() {
        let result = transform("const Comp = () => {\n  const foo = defineModel('foo', { default: 1 })!\n}");
        assert!(result
            .code
            .contains("defineModel('foo', { default: 1 , required: true})!"));
        assert_eq!(
            root(&result, 0).define_model[0],
            "foo: import('vue').UnwrapRef<typeof ___MACROS_model_foo>"
        );
    }

    #[test]
    fn test_required_respects_trailing_comma() {
        let result = transform("const Comp = () => {\n  const foo = defineModel({ default: 1, })!\n}");
        assert!(result
            .code
            .contains("defineModel({ default: 1,  required: true})!"));
    }

    #[test]
    fn test_explicit_required_option_wins() {
        let source = "const Comp = () => {\n  defineModel({ required: false })!\n}";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert!(root(&result, 0).define_model[0].starts_with("modelValue?:"));

        let result = transform("const Comp = () => {\n  const m = defineModel({ required: true })\n}");
        assert!(root(&result, 0).define_model[0].starts_with("modelValue:"));
    }

    #[test]
    fn test_required_adds_options_argument() {
        let result = transform(
            "const Comp = () => {\n  const a = defineModel()!\n  const b = defineModel('b')!\n  const c = defineModel('c',)!\n}",
        );
        assert!(result.code.contains("defineModel( { required: true })!"));
        assert!(result.code.contains("defineModel('b', { required: true })!"));
        assert!(result.code.contains("defineModel('c', { required: true })!"));
        assert_eq!(root(&result, 0).define_model.len(), 6);
    }

    #[test]
    fn test_modifiers_and_quoted_names() {
        let result = transform(
            "const Comp = () => {\n  const title = defineModel<string, 'trim' | 'number'>('title')\n  const name = defineModel(`first-name`)\n}",
        );
        let models = &root(&result, 0).define_model;
        assert_eq!(models.len(), 5);
        assert_eq!(
            models[2],
            "titleModifiers?: Partial<Record<'trim' | 'number', boolean>>"
        );
        assert_eq!(
            models[3],
            "'first-name'?: import('vue').UnwrapRef<typeof ___MACROS_model_first_name>"
        );
        assert!(result.code.contains("let ___MACROS_model_first_name = defineModel(`first-name`)"));
    }

    #[test]
    fn test_non_object_options_fall_through() {
        let source = "function Comp() {\n  defineModel('a', opts)\n}";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert!(root(&result, 0).define_model[0].starts_with("a?:"));

        let result = transform("function Comp() {\n  defineModel('a', opts)!\n}");
        assert_eq!(
            result.code,
            "function Comp() {\n  defineModel('a', opts, { required: true })!\n}"
        );
        assert!(root(&result, 0).define_model[0].starts_with("a:"));
    }

    #[test]
    fn test_expression_statement_has_no_helper() {
        let source = "function Comp() {\n  defineModel('count')\n}";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert_eq!(root(&result, 0).define_model.len(), 2);
    }
}

mod slots_and_expose {
    use super::*;

    #[test]
    fn test_helpers_inserted() {
        let result = transform(
            "function Comp() {\n  const slots = defineSlots<{ default: () => any }>()\n  defineExpose({ focus })\n  return <div />\n}",
        );
        insta::assert_snapshot!(result.code, @r"
        function Comp() {
          const slots = // @ts-ignore
        __MACROS_slots;
        const __MACROS_slots = defineSlots<{ default: () => any }>()
          // @ts-ignore
        __MACROS_exposed;
        const __MACROS_exposed = defineExpose({ focus })
          return <div />
        }
        ");

        let entry = result.root_map.iter().next().unwrap();
        assert_eq!(entry.root.unwrap().kind, RootKind::FunctionDeclaration);
        assert_eq!(
            entry.macros.define_slots.as_deref(),
            Some("Partial<typeof __MACROS_slots>")
        );
        assert_eq!(
            entry.macros.define_expose.as_deref(),
            Some("typeof __MACROS_exposed")
        );
    }

    #[test]
    fn test_duplicate_macros_last_wins() {
        let result = transform(
            "function Comp() {\n  defineSlots<{ a: any }>()\n  const slots = defineSlots<{ b: any }>()\n  defineExpose({ a })\n  defineExpose({ b })\n}",
        );
        assert_eq!(result.code.matches("const __MACROS_slots = ").count(), 2);
        assert_eq!(result.code.matches("const __MACROS_exposed = ").count(), 2);
        assert_eq!(result.root_map.len(), 1);
        let macros = root(&result, 0);
        assert_eq!(
            macros.define_slots.as_deref(),
            Some("Partial<typeof __MACROS_slots>")
        );
        assert_eq!(macros.define_expose.as_deref(), Some("typeof __MACROS_exposed"));
    }

    #[test]
    fn test_outside_function_is_ignored() {
        let source = "defineExpose({ a })\nconst slots = defineSlots()";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert!(result.root_map.is_empty());
        assert_eq!(
            result.global_types,
            get_global_types(&RootMap::new(), &MacroOptions::default())
        );
    }

    #[test]
    fn test_nested_block_is_not_a_root_statement() {
        let source = "const Comp = () => {\n  if (x) {\n    defineExpose({})\n  }\n}";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert!(result.root_map.is_empty());
    }

    #[test]
    fn test_object_method_is_not_a_root() {
        let source = "const o = {\n  setup() {\n    defineExpose({})\n  }\n}";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert!(result.root_map.is_empty());

        let result = transform("const o = {\n  setup: function () {\n    defineExpose({})\n  }\n}");
        let (root, macros) = result.root_map.roots().next().unwrap();
        assert_eq!(root.kind, RootKind::FunctionExpression);
        assert!(macros.define_expose.is_some());
    }

    #[test]
    fn test_nested_roots() {
        let result = transform(
            "const Outer = () => {\n  const Inner = () => {\n    defineExpose({})\n  }\n  defineSlots()\n  return Inner\n}",
        );
        assert_eq!(result.root_map.len(), 2);
        assert!(root(&result, 0).define_slots.is_some());
        assert!(root(&result, 0).define_expose.is_none());
        assert!(root(&result, 1).define_expose.is_some());
        assert!(root(&result, 1).define_slots.is_none());
        // Discovery order: the inner root is reached first.
        let ids: Vec<_> = result.root_map.roots().map(|(r, _)| r.id).collect();
        assert_eq!(ids, vec![RootId(1), RootId(0)]);
    }

    #[test]
    fn test_roots_inside_jsx() {
        let result = transform(
            "const App = () => <List render={(item) => {\n  defineExpose({})\n  return item\n}} />",
        );
        assert!(root(&result, 1).define_expose.is_some());
        assert!(result.root_map.get(Some(RootId(0))).is_none());
    }
}

mod style {
    use super::*;

    #[test]
    fn test_module_level_style() {
        let source = "const styles = defineStyle.scss(`.a {}`)\ndefineStyle(`.b {}`)";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert_eq!(result.root_map.len(), 1);
        assert_eq!(result.root_map.roots().count(), 0);

        let styles = &result.root_map.module_level().unwrap().define_style;
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].lang.as_deref(), Some("scss"));
        assert!(styles[0].is_css_modules);
        assert_eq!(styles[1].lang, None);
        assert!(!styles[1].is_css_modules);
        assert_eq!(
            &source[styles[1].span.start as usize..styles[1].span.end as usize],
            "defineStyle(`.b {}`)"
        );
    }

    #[test]
    fn test_style_inside_root() {
        let result = transform("function Comp() {\n  defineStyle.less(`.a {}`)\n}");
        assert!(result.root_map.module_level().is_none());
        assert_eq!(
            root(&result, 0).define_style[0].lang.as_deref(),
            Some("less")
        );
    }
}

mod define_component {
    use super::*;

    #[test]
    fn test_wrapped_component() {
        let result = transform(
            "const Comp = defineComponent((props) => {\n  const model = defineModel()\n  return () => <div>{model.value}</div>\n}, { name: 'Comp' })",
        );
        assert_eq!(
            result.code,
            "const Comp = (defineComponent(() => ({}) as any, { name: 'Comp' }), (props) => {\n  const model = // @ts-ignore\n___MACROS_model_modelValue;\nlet ___MACROS_model_modelValue = defineModel()\n  return () => <div>{model.value}</div>\n})"
        );
        let macros = root(&result, 0);
        assert!(macros.define_component);
        assert_eq!(macros.define_model.len(), 2);
        assert!(result.root_map.get(Some(RootId(1))).is_none());
    }

    #[test]
    fn test_expression_statement_guard() {
        let result = transform("foo()\ndefineVaporComponent(() => {\n  return null\n})");
        assert_eq!(
            result.code,
            "foo()\n;(defineVaporComponent(() => ({}) as any, ), () => {\n  return null\n})"
        );
    }

    #[test]
    fn test_empty_function_is_not_wrapped() {
        let source = "const Comp = defineComponent(() => {})";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert_eq!(result.root_map.len(), 1);
        assert_eq!(result.root_map.roots().count(), 0);
    }

    #[test]
    fn test_type_arguments_skip_rewrite() {
        let source = "const C = defineComponent<{ a: string }>((props) => {\n  return null\n})";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert_eq!(result.root_map.roots().count(), 0);
    }

    #[test]
    fn test_concise_body_without_children_is_not_wrapped() {
        let source = "const C = defineComponent(() => null)";
        let result = transform(source);
        assert_eq!(result.code, source);
        assert_eq!(result.root_map.roots().count(), 0);

        let result = transform("const C = defineComponent(() => <div />)");
        assert_eq!(
            result.code,
            "const C = (defineComponent(() => ({}) as any, ), () => <div />)"
        );
        assert!(root(&result, 0).define_component);
    }

    #[test]
    fn test_module_level_component_registers_entry() {
        let result = transform("const C = defineComponent(() => null)");
        assert!(result.root_map.module_level().is_some_and(JsxMacros::is_empty));
        assert_eq!(
            result.global_types,
            alias_declarations(&MacroOptions::default())
        );
    }

    #[test]
    fn test_nested_component_in_options() {
        let result = transform(
            "const A = defineComponent((props) => {return null}, { components: { Child: defineComponent((p) => {return null}) } })",
        );
        assert_eq!(
            result.code,
            "const A = (defineComponent(() => ({}) as any, { components: { Child: (defineComponent(() => ({}) as any, ), (p) => {return null}) } }), (props) => {return null})"
        );
        assert!(root(&result, 0).define_component);
        assert!(root(&result, 1).define_component);
    }

    #[test]
    fn test_macro_inside_options() {
        let result = transform(
            "defineComponent((props) => {return null}, { setup: () => { defineExpose({}) } })",
        );
        assert_eq!(
            result.code,
            ";(defineComponent(() => ({}) as any, { setup: () => { // @ts-ignore\n__MACROS_exposed;\nconst __MACROS_exposed = defineExpose({}) } }), (props) => {return null})"
        );
        assert!(root(&result, 1).define_expose.is_some());
    }

    #[test]
    fn test_custom_alias() {
        let options = MacroOptions {
            define_component: MacroAlias::new(["defineComponent", "myComponent"]),
            ..Default::default()
        };
        let result = transform_with("export default myComponent((p) => null)", &options);
        assert_eq!(
            result.code,
            "export default (myComponent(() => ({}) as any, ), (p) => null)"
        );
        assert!(result.global_types.contains("defineComponent: myComponent"));
    }
}

mod walker {
    use super::*;

    fn exposed_root(source: &str) -> u32 {
        let result = transform(source);
        assert!(result.code.contains("const __MACROS_exposed = defineExpose({})"));
        let (root, _) = result
            .root_map
            .roots()
            .find(|(_, macros)| macros.define_expose.is_some())
            .expect("an exposing root");
        root.id.0
    }

    #[test]
    fn test_parameter_defaults() {
        assert_eq!(
            exposed_root("function Comp(render = () => {\n  defineExpose({})\n}) {\n  return render\n}"),
            1
        );
        assert_eq!(
            exposed_root("const { render = () => {\n  defineExpose({})\n} } = props"),
            0
        );
        assert_eq!(
            exposed_root("try {} catch ([render = () => {\n  defineExpose({})\n}]) {}"),
            0
        );
    }

    #[test]
    fn test_namespace_body() {
        exposed_root("namespace NS {\n  export const Comp = () => {\n    defineExpose({})\n  }\n}");
    }

    #[test]
    fn test_accessor_property() {
        exposed_root("class A {\n  accessor render = () => {\n    defineExpose({})\n  }\n}");
    }

    #[test]
    fn test_member_assignment_target() {
        exposed_root("items[key(() => {\n  defineExpose({})\n})] = value");
    }

    #[test]
    fn test_spread_and_dynamic_import() {
        exposed_root("new Foo(...[() => {\n  defineExpose({})\n}])");
        exposed_root("import(resolve(() => {\n  defineExpose({})\n}))");
    }
}

mod pass {
    use super::*;

    fn resolve_twice(source: &str) -> (usize, usize) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        let options = MacroOptions::default();
        let mut codes = Codes::new(source);
        resolve_macros(&ret.program, &mut codes, &options);
        let first = codes.len();
        resolve_macros(&ret.program, &mut codes, &options);
        (first, codes.len())
    }

    #[test]
    fn test_second_pass_duplicates_insertions() {
        let (first, second) = resolve_twice("function Comp() {\n  defineExpose({})\n}");
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn test_second_pass_conflicts_with_component_rewrite() {
        resolve_twice("const C = defineComponent((props) => null, {})");
    }

    #[test]
    fn test_parse_error() {
        let err = transform_jsx_macros("const = 1", "broken.tsx", &MacroOptions::default())
            .unwrap_err();
        assert!(matches!(err, MacroError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse broken.tsx"));
    }

    #[test]
    fn test_global_types_follow_root_map() {
        let result = transform("const Comp = () => {\n  defineSlots()\n}");
        assert!(result.global_types.contains("declare const { defineModel }"));
        assert!(result
            .global_types
            .contains("declare function defineSlots<T extends Record<string, any>>(slots: T): T;"));
    }
}
