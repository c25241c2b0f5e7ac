use proptest::prelude::*;
use vactory_dynamic_field::naming::{COMPONENT_PREFIX, EXTRA_PREFIX};
use vactory_dynamic_field::{derive_field_name, storage_name, STORAGE_NAME_LEN};

proptest! {
    #[test]
    fn storage_name_is_deterministic_and_bounded(
        widget in "[a-z_]{1,12}:[a-z_]{1,12}",
        field in "[a-z_]{1,16}",
        index in 0usize..1000,
    ) {
        let a = storage_name(&widget, &field, index);
        let b = storage_name(&widget, &field, index);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.len() <= STORAGE_NAME_LEN);
        prop_assert!(a.starts_with(COMPONENT_PREFIX));
    }

    #[test]
    fn storage_name_differs_per_index(
        widget in "[a-z_]{1,12}:[a-z_]{1,12}",
        field in "[a-z_]{1,16}",
        i in 0usize..1000,
        j in 0usize..1000,
    ) {
        prop_assume!(i != j);
        prop_assert_ne!(storage_name(&widget, &field, i), storage_name(&widget, &field, j));
    }

    #[test]
    fn extra_names_never_collide_with_component_names(
        widget in "[a-z]{1,12}",
        field in "[a-z]{1,16}",
    ) {
        let extra = derive_field_name(EXTRA_PREFIX, &widget, &[field.as_str()]);
        let component = derive_field_name(COMPONENT_PREFIX, &widget, &[field.as_str(), "0"]);
        prop_assert_ne!(extra, component);
    }
}
