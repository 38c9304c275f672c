// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Well-known tag codes and their diagnostic names.
//!
//! A tag code is 16 bits: the high nibble is the record type, the low 12 bits
//! an index within that type. The constants below are the codes observed in
//! shim databases. Names are for humans only: nothing in the parser branches
//! on them.
//!
//! The name table is a sorted static slice searched with `binary_search_by_key`,
//! so lookups are `O(log n)` with no allocation and no lazy initialisation.

use crate::binary::Tag;

/// Name returned by [`tag_name`] for codes that are not in the table.
pub const INVALID_TAG_NAME: &str = "InvalidTag";

pub const TAG_NULL: Tag = 0x0000;

// Null
pub const TAG_INCLUDE: Tag = 0x1001;
pub const TAG_GENERAL: Tag = 0x1002;
pub const TAG_MATCH_LOGIC_NOT: Tag = 0x1003;
pub const TAG_APPLY_ALL_SHIMS: Tag = 0x1004;
pub const TAG_USE_SERVICE_PACK_FILES: Tag = 0x1005;
pub const TAG_MITIGATION_OS: Tag = 0x1006;
pub const TAG_BLOCK_UPGRADE: Tag = 0x1007;
pub const TAG_INCLUDEEXCLUDEDLL: Tag = 0x1008;
pub const TAG_RAC_EVENT_OFF: Tag = 0x1009;
pub const TAG_TELEMETRY_OFF: Tag = 0x100A;
pub const TAG_SHIM_ENGINE_OFF: Tag = 0x100B;
pub const TAG_LAYER_PROPAGATION_OFF: Tag = 0x100C;
pub const TAG_REINSTALL_UPGRADE: Tag = 0x100D;

// Word
pub const TAG_MATCH_MODE: Tag = 0x3001;
pub const TAG_TAG: Tag = 0x3801;
pub const TAG_INDEX_TAG: Tag = 0x3802;
pub const TAG_INDEX_KEY: Tag = 0x3803;

// Dword
pub const TAG_SIZE: Tag = 0x4001;
pub const TAG_OFFSET: Tag = 0x4002;
pub const TAG_CHECKSUM: Tag = 0x4003;
pub const TAG_SHIM_TAGID: Tag = 0x4004;
pub const TAG_PATCH_TAGID: Tag = 0x4005;
pub const TAG_MODULE_TYPE: Tag = 0x4006;
pub const TAG_VERDATEHI: Tag = 0x4007;
pub const TAG_VERDATELO: Tag = 0x4008;
pub const TAG_VERFILEOS: Tag = 0x4009;
pub const TAG_VERFILETYPE: Tag = 0x400A;
pub const TAG_PE_CHECKSUM: Tag = 0x400B;
pub const TAG_PREVOSMAJORVER: Tag = 0x400C;
pub const TAG_PREVOSMINORVER: Tag = 0x400D;
pub const TAG_PREVOSPLATFORMID: Tag = 0x400E;
pub const TAG_PREVOSBUILDNO: Tag = 0x400F;
pub const TAG_PROBLEMSEVERITY: Tag = 0x4010;
pub const TAG_LANGID: Tag = 0x4011;
pub const TAG_VER_LANGUAGE: Tag = 0x4012;
pub const TAG_ENGINE: Tag = 0x4014;
pub const TAG_HTMLHELPID: Tag = 0x4015;
pub const TAG_INDEX_FLAGS: Tag = 0x4016;
pub const TAG_FLAGS: Tag = 0x4017;
pub const TAG_DATA_VALUETYPE: Tag = 0x4018;
pub const TAG_DATA_DWORD: Tag = 0x4019;
pub const TAG_LAYER_TAGID: Tag = 0x401A;
pub const TAG_MSI_TRANSFORM_TAGID: Tag = 0x401B;
pub const TAG_LINKER_VERSION: Tag = 0x401C;
pub const TAG_LINK_DATE: Tag = 0x401D;
pub const TAG_UPTO_LINK_DATE: Tag = 0x401E;
pub const TAG_OS_SERVICE_PACK: Tag = 0x401F;
pub const TAG_FLAG_TAGID: Tag = 0x4020;
pub const TAG_RUNTIME_PLATFORM: Tag = 0x4021;
pub const TAG_OS_SKU: Tag = 0x4022;
pub const TAG_OS_PLATFORM: Tag = 0x4023;
pub const TAG_APP_NAME_RC_ID: Tag = 0x4024;
pub const TAG_VENDOR_NAME_RC_ID: Tag = 0x4025;
pub const TAG_SUMMARY_MSG_RC_ID: Tag = 0x4026;
pub const TAG_VISTA_SKU: Tag = 0x4027;
pub const TAG_DESCRIPTION_RC_ID: Tag = 0x4028;
pub const TAG_PARAMETER1_RC_ID: Tag = 0x4029;
pub const TAG_CONTEXT_TAGID: Tag = 0x4030;
pub const TAG_EXE_WRAPPER: Tag = 0x4031;
pub const TAG_TAGID: Tag = 0x4801;

// Qword
pub const TAG_TIME: Tag = 0x5001;
pub const TAG_BIN_FILE_VERSION: Tag = 0x5002;
pub const TAG_BIN_PRODUCT_VERSION: Tag = 0x5003;
pub const TAG_MODTIME: Tag = 0x5004;
pub const TAG_FLAG_MASK_KERNEL: Tag = 0x5005;
pub const TAG_UPTO_BIN_PRODUCT_VERSION: Tag = 0x5006;
pub const TAG_DATA_QWORD: Tag = 0x5007;
pub const TAG_FLAG_MASK_USER: Tag = 0x5008;
pub const TAG_FLAGS_NTVDM1: Tag = 0x5009;
pub const TAG_FLAGS_NTVDM2: Tag = 0x500A;
pub const TAG_FLAGS_NTVDM3: Tag = 0x500B;
pub const TAG_FLAG_MASK_SHELL: Tag = 0x500C;
pub const TAG_UPTO_BIN_FILE_VERSION: Tag = 0x500D;
pub const TAG_FLAG_MASK_FUSION: Tag = 0x500E;
pub const TAG_FLAG_PROCESSPARAM: Tag = 0x500F;
pub const TAG_FLAG_LUA: Tag = 0x5010;
pub const TAG_FLAG_INSTALL: Tag = 0x5011;

// StringRef
pub const TAG_NAME: Tag = 0x6001;
pub const TAG_DESCRIPTION: Tag = 0x6002;
pub const TAG_MODULE: Tag = 0x6003;
pub const TAG_API: Tag = 0x6004;
pub const TAG_VENDOR: Tag = 0x6005;
pub const TAG_APP_NAME: Tag = 0x6006;
pub const TAG_COMMAND_LINE: Tag = 0x6008;
pub const TAG_COMPANY_NAME: Tag = 0x6009;
pub const TAG_DLLFILE: Tag = 0x600A;
pub const TAG_WILDCARD_NAME: Tag = 0x600B;
pub const TAG_PRODUCT_NAME: Tag = 0x6010;
pub const TAG_PRODUCT_VERSION: Tag = 0x6011;
pub const TAG_FILE_DESCRIPTION: Tag = 0x6012;
pub const TAG_FILE_VERSION: Tag = 0x6013;
pub const TAG_ORIGINAL_FILENAME: Tag = 0x6014;
pub const TAG_INTERNAL_NAME: Tag = 0x6015;
pub const TAG_LEGAL_COPYRIGHT: Tag = 0x6016;
pub const TAG_16BIT_DESCRIPTION: Tag = 0x6017;
pub const TAG_APPHELP_DETAILS: Tag = 0x6018;
pub const TAG_LINK_URL: Tag = 0x6019;
pub const TAG_LINK_TEXT: Tag = 0x601A;
pub const TAG_APPHELP_TITLE: Tag = 0x601B;
pub const TAG_APPHELP_CONTACT: Tag = 0x601C;
pub const TAG_SXS_MANIFEST: Tag = 0x601D;
pub const TAG_DATA_STRING: Tag = 0x601E;
pub const TAG_MSI_TRANSFORM_FILE: Tag = 0x601F;
pub const TAG_16BIT_MODULE_NAME: Tag = 0x6020;
pub const TAG_LAYER_DISPLAYNAME: Tag = 0x6021;
pub const TAG_COMPILER_VERSION: Tag = 0x6022;
pub const TAG_ACTION_TYPE: Tag = 0x6023;
pub const TAG_EXPORT_NAME: Tag = 0x6024;

// List
pub const TAG_DATABASE: Tag = 0x7001;
pub const TAG_LIBRARY: Tag = 0x7002;
pub const TAG_INEXCLUDE: Tag = 0x7003;
pub const TAG_SHIM: Tag = 0x7004;
pub const TAG_PATCH: Tag = 0x7005;
pub const TAG_APP: Tag = 0x7006;
pub const TAG_EXE: Tag = 0x7007;
pub const TAG_MATCHING_FILE: Tag = 0x7008;
pub const TAG_SHIM_REF: Tag = 0x7009;
pub const TAG_PATCH_REF: Tag = 0x700A;
pub const TAG_LAYER: Tag = 0x700B;
pub const TAG_FILE: Tag = 0x700C;
pub const TAG_APPHELP: Tag = 0x700D;
pub const TAG_LINK: Tag = 0x700E;
pub const TAG_DATA: Tag = 0x700F;
pub const TAG_MSI_TRANSFORM: Tag = 0x7010;
pub const TAG_MSI_TRANSFORM_REF: Tag = 0x7011;
pub const TAG_MSI_PACKAGE: Tag = 0x7012;
pub const TAG_FLAG: Tag = 0x7013;
pub const TAG_MSI_CUSTOM_ACTION: Tag = 0x7014;
pub const TAG_FLAG_REF: Tag = 0x7015;
pub const TAG_ACTION: Tag = 0x7016;
pub const TAG_LOOKUP: Tag = 0x7017;
pub const TAG_CONTEXT: Tag = 0x7018;
pub const TAG_CONTEXT_REF: Tag = 0x7019;
pub const TAG_STRINGTABLE: Tag = 0x7801;
pub const TAG_INDEXES: Tag = 0x7802;
pub const TAG_INDEX: Tag = 0x7803;

// String
pub const TAG_STRINGTABLE_ITEM: Tag = 0x8801;

// Binary
pub const TAG_PATCH_BITS: Tag = 0x9002;
pub const TAG_FILE_BITS: Tag = 0x9003;
pub const TAG_EXE_ID: Tag = 0x9004;
pub const TAG_DATA_BITS: Tag = 0x9005;
pub const TAG_MSI_PACKAGE_ID: Tag = 0x9006;
pub const TAG_DATABASE_ID: Tag = 0x9007;
pub const TAG_CONTEXT_PLATFORM_ID: Tag = 0x9008;
pub const TAG_CONTEXT_BRANCH_ID: Tag = 0x9009;
pub const TAG_FIX_ID: Tag = 0x9010;
pub const TAG_APP_ID: Tag = 0x9011;
pub const TAG_INDEX_BITS: Tag = 0x9801;

/// Code → name, sorted by code. `tag_name` relies on the ordering.
static TAG_NAMES: &[(Tag, &str)] = &[
    (TAG_NULL, "NULL"),
    (TAG_INCLUDE, "INCLUDE"),
    (TAG_GENERAL, "GENERAL"),
    (TAG_MATCH_LOGIC_NOT, "MATCH_LOGIC_NOT"),
    (TAG_APPLY_ALL_SHIMS, "APPLY_ALL_SHIMS"),
    (TAG_USE_SERVICE_PACK_FILES, "USE_SERVICE_PACK_FILES"),
    (TAG_MITIGATION_OS, "MITIGATION_OS"),
    (TAG_BLOCK_UPGRADE, "BLOCK_UPGRADE"),
    (TAG_INCLUDEEXCLUDEDLL, "INCLUDEEXCLUDEDLL"),
    (TAG_RAC_EVENT_OFF, "RAC_EVENT_OFF"),
    (TAG_TELEMETRY_OFF, "TELEMETRY_OFF"),
    (TAG_SHIM_ENGINE_OFF, "SHIM_ENGINE_OFF"),
    (TAG_LAYER_PROPAGATION_OFF, "LAYER_PROPAGATION_OFF"),
    (TAG_REINSTALL_UPGRADE, "REINSTALL_UPGRADE"),
    (TAG_MATCH_MODE, "MATCH_MODE"),
    (TAG_TAG, "TAG"),
    (TAG_INDEX_TAG, "INDEX_TAG"),
    (TAG_INDEX_KEY, "INDEX_KEY"),
    (TAG_SIZE, "SIZE"),
    (TAG_OFFSET, "OFFSET"),
    (TAG_CHECKSUM, "CHECKSUM"),
    (TAG_SHIM_TAGID, "SHIM_TAGID"),
    (TAG_PATCH_TAGID, "PATCH_TAGID"),
    (TAG_MODULE_TYPE, "MODULE_TYPE"),
    (TAG_VERDATEHI, "VERDATEHI"),
    (TAG_VERDATELO, "VERDATELO"),
    (TAG_VERFILEOS, "VERFILEOS"),
    (TAG_VERFILETYPE, "VERFILETYPE"),
    (TAG_PE_CHECKSUM, "PE_CHECKSUM"),
    (TAG_PREVOSMAJORVER, "PREVOSMAJORVER"),
    (TAG_PREVOSMINORVER, "PREVOSMINORVER"),
    (TAG_PREVOSPLATFORMID, "PREVOSPLATFORMID"),
    (TAG_PREVOSBUILDNO, "PREVOSBUILDNO"),
    (TAG_PROBLEMSEVERITY, "PROBLEMSEVERITY"),
    (TAG_LANGID, "LANGID"),
    (TAG_VER_LANGUAGE, "VER_LANGUAGE"),
    (TAG_ENGINE, "ENGINE"),
    (TAG_HTMLHELPID, "HTMLHELPID"),
    (TAG_INDEX_FLAGS, "INDEX_FLAGS"),
    (TAG_FLAGS, "FLAGS"),
    (TAG_DATA_VALUETYPE, "DATA_VALUETYPE"),
    (TAG_DATA_DWORD, "DATA_DWORD"),
    (TAG_LAYER_TAGID, "LAYER_TAGID"),
    (TAG_MSI_TRANSFORM_TAGID, "MSI_TRANSFORM_TAGID"),
    (TAG_LINKER_VERSION, "LINKER_VERSION"),
    (TAG_LINK_DATE, "LINK_DATE"),
    (TAG_UPTO_LINK_DATE, "UPTO_LINK_DATE"),
    (TAG_OS_SERVICE_PACK, "OS_SERVICE_PACK"),
    (TAG_FLAG_TAGID, "FLAG_TAGID"),
    (TAG_RUNTIME_PLATFORM, "RUNTIME_PLATFORM"),
    (TAG_OS_SKU, "OS_SKU"),
    (TAG_OS_PLATFORM, "OS_PLATFORM"),
    (TAG_APP_NAME_RC_ID, "APP_NAME_RC_ID"),
    (TAG_VENDOR_NAME_RC_ID, "VENDOR_NAME_RC_ID"),
    (TAG_SUMMARY_MSG_RC_ID, "SUMMARY_MSG_RC_ID"),
    (TAG_VISTA_SKU, "VISTA_SKU"),
    (TAG_DESCRIPTION_RC_ID, "DESCRIPTION_RC_ID"),
    (TAG_PARAMETER1_RC_ID, "PARAMETER1_RC_ID"),
    (TAG_CONTEXT_TAGID, "CONTEXT_TAGID"),
    (TAG_EXE_WRAPPER, "EXE_WRAPPER"),
    (TAG_TAGID, "TAGID"),
    (TAG_TIME, "TIME"),
    (TAG_BIN_FILE_VERSION, "BIN_FILE_VERSION"),
    (TAG_BIN_PRODUCT_VERSION, "BIN_PRODUCT_VERSION"),
    (TAG_MODTIME, "MODTIME"),
    (TAG_FLAG_MASK_KERNEL, "FLAG_MASK_KERNEL"),
    (TAG_UPTO_BIN_PRODUCT_VERSION, "UPTO_BIN_PRODUCT_VERSION"),
    (TAG_DATA_QWORD, "DATA_QWORD"),
    (TAG_FLAG_MASK_USER, "FLAG_MASK_USER"),
    (TAG_FLAGS_NTVDM1, "FLAGS_NTVDM1"),
    (TAG_FLAGS_NTVDM2, "FLAGS_NTVDM2"),
    (TAG_FLAGS_NTVDM3, "FLAGS_NTVDM3"),
    (TAG_FLAG_MASK_SHELL, "FLAG_MASK_SHELL"),
    (TAG_UPTO_BIN_FILE_VERSION, "UPTO_BIN_FILE_VERSION"),
    (TAG_FLAG_MASK_FUSION, "FLAG_MASK_FUSION"),
    (TAG_FLAG_PROCESSPARAM, "FLAG_PROCESSPARAM"),
    (TAG_FLAG_LUA, "FLAG_LUA"),
    (TAG_FLAG_INSTALL, "FLAG_INSTALL"),
    (TAG_NAME, "NAME"),
    (TAG_DESCRIPTION, "DESCRIPTION"),
    (TAG_MODULE, "MODULE"),
    (TAG_API, "API"),
    (TAG_VENDOR, "VENDOR"),
    (TAG_APP_NAME, "APP_NAME"),
    (TAG_COMMAND_LINE, "COMMAND_LINE"),
    (TAG_COMPANY_NAME, "COMPANY_NAME"),
    (TAG_DLLFILE, "DLLFILE"),
    (TAG_WILDCARD_NAME, "WILDCARD_NAME"),
    (TAG_PRODUCT_NAME, "PRODUCT_NAME"),
    (TAG_PRODUCT_VERSION, "PRODUCT_VERSION"),
    (TAG_FILE_DESCRIPTION, "FILE_DESCRIPTION"),
    (TAG_FILE_VERSION, "FILE_VERSION"),
    (TAG_ORIGINAL_FILENAME, "ORIGINAL_FILENAME"),
    (TAG_INTERNAL_NAME, "INTERNAL_NAME"),
    (TAG_LEGAL_COPYRIGHT, "LEGAL_COPYRIGHT"),
    (TAG_16BIT_DESCRIPTION, "16BIT_DESCRIPTION"),
    (TAG_APPHELP_DETAILS, "APPHELP_DETAILS"),
    (TAG_LINK_URL, "LINK_URL"),
    (TAG_LINK_TEXT, "LINK_TEXT"),
    (TAG_APPHELP_TITLE, "APPHELP_TITLE"),
    (TAG_APPHELP_CONTACT, "APPHELP_CONTACT"),
    (TAG_SXS_MANIFEST, "SXS_MANIFEST"),
    (TAG_DATA_STRING, "DATA_STRING"),
    (TAG_MSI_TRANSFORM_FILE, "MSI_TRANSFORM_FILE"),
    (TAG_16BIT_MODULE_NAME, "16BIT_MODULE_NAME"),
    (TAG_LAYER_DISPLAYNAME, "LAYER_DISPLAYNAME"),
    (TAG_COMPILER_VERSION, "COMPILER_VERSION"),
    (TAG_ACTION_TYPE, "ACTION_TYPE"),
    (TAG_EXPORT_NAME, "EXPORT_NAME"),
    (TAG_DATABASE, "DATABASE"),
    (TAG_LIBRARY, "LIBRARY"),
    (TAG_INEXCLUDE, "INEXCLUDE"),
    (TAG_SHIM, "SHIM"),
    (TAG_PATCH, "PATCH"),
    (TAG_APP, "APP"),
    (TAG_EXE, "EXE"),
    (TAG_MATCHING_FILE, "MATCHING_FILE"),
    (TAG_SHIM_REF, "SHIM_REF"),
    (TAG_PATCH_REF, "PATCH_REF"),
    (TAG_LAYER, "LAYER"),
    (TAG_FILE, "FILE"),
    (TAG_APPHELP, "APPHELP"),
    (TAG_LINK, "LINK"),
    (TAG_DATA, "DATA"),
    (TAG_MSI_TRANSFORM, "MSI_TRANSFORM"),
    (TAG_MSI_TRANSFORM_REF, "MSI_TRANSFORM_REF"),
    (TAG_MSI_PACKAGE, "MSI_PACKAGE"),
    (TAG_FLAG, "FLAG"),
    (TAG_MSI_CUSTOM_ACTION, "MSI_CUSTOM_ACTION"),
    (TAG_FLAG_REF, "FLAG_REF"),
    (TAG_ACTION, "ACTION"),
    (TAG_LOOKUP, "LOOKUP"),
    (TAG_CONTEXT, "CONTEXT"),
    (TAG_CONTEXT_REF, "CONTEXT_REF"),
    (TAG_STRINGTABLE, "STRINGTABLE"),
    (TAG_INDEXES, "INDEXES"),
    (TAG_INDEX, "INDEX"),
    (TAG_STRINGTABLE_ITEM, "STRINGTABLE_ITEM"),
    (TAG_PATCH_BITS, "PATCH_BITS"),
    (TAG_FILE_BITS, "FILE_BITS"),
    (TAG_EXE_ID, "EXE_ID"),
    (TAG_DATA_BITS, "DATA_BITS"),
    (TAG_MSI_PACKAGE_ID, "MSI_PACKAGE_ID"),
    (TAG_DATABASE_ID, "DATABASE_ID"),
    (TAG_CONTEXT_PLATFORM_ID, "CONTEXT_PLATFORM_ID"),
    (TAG_CONTEXT_BRANCH_ID, "CONTEXT_BRANCH_ID"),
    (TAG_FIX_ID, "FIX_ID"),
    (TAG_APP_ID, "APP_ID"),
    (TAG_INDEX_BITS, "INDEX_BITS"),
];

/// Human-readable name for a tag code, or `"InvalidTag"` when unknown.
///
/// ```
/// use shimdb::tags::{tag_name, TAG_DATABASE};
///
/// assert_eq!(tag_name(TAG_DATABASE), "DATABASE");
/// assert_eq!(tag_name(0xF00F), "InvalidTag");
/// ```
pub fn tag_name(tag: Tag) -> &'static str {
    TAG_NAMES
        .binary_search_by_key(&tag, |&(code, _)| code)
        .map(|i| TAG_NAMES[i].1)
        .unwrap_or(INVALID_TAG_NAME)
}

/// Reverse lookup for tooling: accepts a table name (case-insensitive,
/// optional `TAG_` prefix) or a hex code such as `0x6001`.
pub fn tag_from_name(name: &str) -> Option<Tag> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        return Tag::from_str_radix(hex, 16).ok();
    }

    let upper = name.to_ascii_uppercase();
    let bare = upper.strip_prefix("TAG_").unwrap_or(&upper);
    TAG_NAMES
        .iter()
        .find(|(_, n)| *n == bare)
        .map(|&(code, _)| code)
}

/// Every known `(code, name)` pair, sorted by code.
pub fn known_tags() -> &'static [(Tag, &'static str)] {
    TAG_NAMES
}
