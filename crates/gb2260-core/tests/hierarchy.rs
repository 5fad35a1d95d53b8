use gb2260_core::{Dataset, Division, GbError, Level, Resolver};

fn resolver() -> Resolver {
    Resolver::new(Dataset::bundled())
}

#[test]
fn same_code_yields_same_instance_while_held() {
    let r = resolver();
    let a = r.get(110105).unwrap();
    let b = r.get("110105").unwrap();
    let c = r.get(String::from("110105")).unwrap();
    assert_eq!(a, b);
    assert!(Division::ptr_eq(&a, &b));
    assert!(Division::ptr_eq(&a, &c));
}

#[test]
fn free_functions_use_the_default_resolver() {
    let a = gb2260_core::get(110105).unwrap();
    let b = gb2260_core::default_resolver().get("110105").unwrap();
    assert!(Division::ptr_eq(&a, &b));
    assert!(gb2260_core::search("1101", None).iter().any(|d| Division::ptr_eq(d, &a)));
    assert_eq!(gb2260_core::default_resolver().dataset(), &Dataset::bundled());
}

#[test]
fn unknown_codes_are_invalid() {
    let r = resolver();
    for code in ["999999", "110103x", "", "110110"] {
        match r.get(code) {
            Err(GbError::InvalidCode(c)) => assert_eq!(c, code.trim()),
            other => panic!("{code:?} should be invalid, got {other:?}"),
        }
    }
    assert!(r.get(-110000i64).is_err());
}

#[test]
fn every_record_round_trips() {
    let r = resolver();
    for (code, name) in r.dataset().iter() {
        let d = r.get(code.as_u32()).unwrap();
        assert_eq!(d.name(), name);
        assert_eq!(d.code(), code.to_string());
        assert_eq!(d.division_code(), code);
    }
}

#[test]
fn province_of_province_is_itself() {
    let r = resolver();
    for (code, _) in r.dataset().iter() {
        let d = r.get(code).unwrap();
        let province = d.province().unwrap();
        assert!(province.is_province());
        assert_eq!(province.province().unwrap(), province);
    }
}

#[test]
fn province_level_has_no_prefecture_or_county() {
    let beijing = resolver().get(110000).unwrap();
    assert!(beijing.is_province());
    assert!(!beijing.is_prefecture());
    assert!(!beijing.is_county());
    assert!(beijing.prefecture().unwrap().is_none());
    assert!(beijing.county().is_none());
    assert_eq!(beijing.level(), Level::Province);
    assert_eq!(beijing.path().unwrap(), vec![beijing.clone()]);
}

#[test]
fn prefecture_level_stack_has_two_entries() {
    let r = resolver();
    let chaoyang_city = r.get(211300).unwrap();
    assert!(chaoyang_city.is_prefecture());
    assert!(!chaoyang_city.is_county());
    assert!(chaoyang_city.county().is_none());
    assert_eq!(chaoyang_city.prefecture().unwrap(), Some(chaoyang_city.clone()));

    let stack = chaoyang_city.stack();
    assert_eq!(stack.len(), 2);
    let path = chaoyang_city.path().unwrap();
    assert_eq!(path[0].name(), "辽宁省");
    assert_eq!(path[1], chaoyang_city);
}

#[test]
fn county_level_stack_ends_with_itself() {
    let r = resolver();
    let d = r.get(110105).unwrap();
    assert!(d.is_county());
    assert_eq!(d.county(), Some(d.clone()));

    let path = d.path().unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path.last(), Some(&d));
    assert!(Division::ptr_eq(&path[2], &d));
    assert_eq!(path[1].code(), "110100");
}

#[test]
fn stack_is_lazy_and_restartable() {
    let d = resolver().get(130602).unwrap();
    let mut stack = d.stack();
    let restart = stack.clone();
    assert_eq!(stack.next().unwrap().unwrap().name(), "河北省");
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.by_ref().count(), 2);
    assert!(stack.next().is_none());

    let names: Vec<String> = restart.map(|d| d.unwrap().name().to_owned()).collect();
    assert_eq!(names, ["河北省", "保定市", "竞秀区"]);
}

#[test]
fn missing_parent_propagates_invalid_code() {
    let r = Resolver::new(Dataset::from_entries([(110000, "北京市"), (110105, "朝阳区")]));
    let d = r.get(110105).unwrap();
    assert_eq!(d.province().unwrap().name(), "北京市");
    let err = d.prefecture().unwrap_err();
    assert_eq!(err.invalid_code(), Some("110100"));
    assert!(d.path().is_err());
    // rendering skips the unresolved level
    assert_eq!(d.to_string(), "<GB2260 110105 北京市/朝阳区>");
}

#[test]
fn rendering() {
    let r = resolver();
    assert_eq!(
        r.get(110105).unwrap().to_string(),
        "<GB2260 110105 北京市/市辖区/朝阳区>"
    );
    assert_eq!(r.get(120000).unwrap().to_string(), "<GB2260 120000 天津市>");
    assert_eq!(format!("{:?}", r.get(110105).unwrap()), "gb2260::get(\"110105\")");
}

#[test]
fn equality_and_hashing_are_by_code() {
    use std::collections::HashSet;

    let a = Resolver::new(Dataset::bundled()).get(110105).unwrap();
    let b = Resolver::new(Dataset::bundled()).get(110105).unwrap();
    assert_eq!(a, b);
    assert!(!Division::ptr_eq(&a, &b));

    let set: HashSet<Division> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn divisions_are_shareable_across_threads() {
    let r = resolver();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = r.clone();
            std::thread::spawn(move || r.get(110105).unwrap())
        })
        .collect();
    let held = r.get(110105).unwrap();
    for h in handles {
        let d = h.join().unwrap();
        assert_eq!(d, held);
    }
}
