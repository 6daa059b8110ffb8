//! JNI entry points for `com.spoofcatalog.NativeCatalog`.
//!
//! Every method is `static native` on the Java side. Failures are logged and
//! surface to Java as `null`; an unknown name is not a failure and yields
//! `null` or an empty array as documented per method.

use jni::errors::Result as JniResult;
use jni::objects::{JClass, JObject, JObjectArray, JString, JValue};
use jni::sys::{jobject, jobjectArray, jstring};
use jni::JNIEnv;

use crate::catalog::{self, Catalog};
use crate::versions::VersionField;

const STRING_CLASS: &str = "java/lang/String";
const HASH_MAP_CLASS: &str = "java/util/HashMap";
const MAP_PUT_SIG: &str = "(Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;";

/// Derived feature set of a device in catalog order rather than set order.
pub fn device_features_ordered(name: Option<&str>) -> Vec<&'static str> {
    let catalog = Catalog::builtin();
    let derived = catalog.features_for_device(name);
    catalog
        .feature_level_names()
        .into_iter()
        .filter(|level| derived.contains(level))
        .collect()
}

fn finish<'local, T>(env: &mut JNIEnv<'local>, what: &str, result: JniResult<T>) -> jobject
where
    T: Into<JObject<'local>>,
{
    match result {
        Ok(obj) => {
            let obj: JObject<'local> = obj.into();
            obj.into_raw()
        }
        Err(e) => {
            error!("{} failed: {:?}", what, e);
            let _ = env.exception_clear();
            std::ptr::null_mut()
        }
    }
}

fn optional_string(env: &mut JNIEnv, value: &JString) -> JniResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(env.get_string(value)?.into()))
}

fn string_array<'local>(
    env: &mut JNIEnv<'local>,
    items: &[&str],
) -> JniResult<JObjectArray<'local>> {
    let array = env.new_object_array(items.len() as i32, STRING_CLASS, JObject::null())?;
    for (i, item) in items.iter().enumerate() {
        let value = env.new_string(item)?;
        env.set_object_array_element(&array, i as i32, value)?;
    }
    Ok(array)
}

fn read_string_array(env: &mut JNIEnv, array: &JObjectArray) -> JniResult<Vec<String>> {
    if array.is_null() {
        return Ok(Vec::new());
    }
    let len = env.get_array_length(array)?;
    let mut out = Vec::with_capacity(len as usize);
    for i in 0..len {
        let element: JString = env.get_object_array_element(array, i)?.into();
        if let Some(value) = optional_string(env, &element)? {
            out.push(value);
        }
    }
    Ok(out)
}

fn map_put(env: &mut JNIEnv, map: &JObject, key: &JObject, value: &JObject) -> JniResult<()> {
    env.call_method(
        map,
        "put",
        MAP_PUT_SIG,
        &[JValue::Object(key), JValue::Object(value)],
    )?;
    Ok(())
}

fn device_props<'local>(env: &mut JNIEnv<'local>, name: &JString) -> JniResult<JObject<'local>> {
    let name = optional_string(env, name)?;
    let Some(device) = catalog::device_by_name(name.as_deref()) else {
        return Ok(JObject::null());
    };

    let map = env.new_object(HASH_MAP_CLASS, "()V", &[])?;
    for &(key, value) in device.props {
        let key = env.new_string(key)?;
        let value = env.new_string(value)?;
        map_put(env, &map, &key, &value)?;
    }
    debug!("Props for {}: {} entries", device.device_name, device.props.len());
    Ok(map)
}

fn version_map<'local>(env: &mut JNIEnv<'local>, label: &JString) -> JniResult<JObject<'local>> {
    let Some(label) = optional_string(env, label)? else {
        return Ok(JObject::null());
    };
    let Some(version) = catalog::version_from_label(&label) else {
        debug!("Android version {:?} not in catalog", label);
        return Ok(JObject::null());
    };

    let map = env.new_object(HASH_MAP_CLASS, "()V", &[])?;
    for (field, value) in version.as_map() {
        let key = env.new_string(field)?;
        let value: JObject = match value {
            VersionField::Text(text) => env.new_string(text)?.into(),
            VersionField::Int(int) => env
                .call_static_method(
                    "java/lang/Integer",
                    "valueOf",
                    "(I)Ljava/lang/Integer;",
                    &[JValue::Int(int)],
                )?
                .l()?,
        };
        map_put(env, &map, &key, &value)?;
    }
    Ok(map)
}

fn device_version_label<'local>(
    env: &mut JNIEnv<'local>,
    name: &JString,
) -> JniResult<JObject<'local>> {
    let name = optional_string(env, name)?;
    match catalog::device_by_name(name.as_deref()).and_then(|d| d.android_version) {
        Some(version) => Ok(env.new_string(version.label)?.into()),
        None => Ok(JObject::null()),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDeviceNames(
    mut env: JNIEnv,
    _class: JClass,
) -> jobjectArray {
    let result = string_array(&mut env, &catalog::device_names());
    finish(&mut env, "nativeDeviceNames", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeAndroidVersionLabels(
    mut env: JNIEnv,
    _class: JClass,
) -> jobjectArray {
    let result = string_array(&mut env, &catalog::android_version_labels());
    finish(&mut env, "nativeAndroidVersionLabels", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDefaultDeviceName(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let result = env.new_string(catalog::default_device_name());
    finish(&mut env, "nativeDefaultDeviceName", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDefaultFeatures(
    mut env: JNIEnv,
    _class: JClass,
) -> jobjectArray {
    let names: Vec<&str> = catalog::default_features()
        .iter()
        .map(|f| f.display_name)
        .collect();
    let result = string_array(&mut env, &names);
    finish(&mut env, "nativeDefaultFeatures", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDeviceProps(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
) -> jobject {
    let result = device_props(&mut env, &name);
    finish(&mut env, "nativeDeviceProps", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDeviceFeatures(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
) -> jobjectArray {
    let result = optional_string(&mut env, &name).and_then(|name| {
        let features = device_features_ordered(name.as_deref());
        string_array(&mut env, &features)
    });
    finish(&mut env, "nativeDeviceFeatures", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeDeviceVersionLabel(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
) -> jstring {
    let result = device_version_label(&mut env, &name);
    finish(&mut env, "nativeDeviceVersionLabel", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeFeatureFlags(
    mut env: JNIEnv,
    _class: JClass,
    display_names: JObjectArray,
) -> jobjectArray {
    let result = read_string_array(&mut env, &display_names).and_then(|names| {
        let flags = catalog::feature_flags_for(names.iter().map(String::as_str));
        info!("Spoofing {} feature flag(s) for {:?}", flags.len(), names);
        string_array(&mut env, &flags)
    });
    finish(&mut env, "nativeFeatureFlags", result)
}

#[no_mangle]
pub extern "system" fn Java_com_spoofcatalog_NativeCatalog_nativeVersionMap(
    mut env: JNIEnv,
    _class: JClass,
    label: JString,
) -> jobject {
    let result = version_map(&mut env, &label);
    finish(&mut env, "nativeVersionMap", result)
}
