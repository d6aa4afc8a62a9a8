use super::const_error;

const_error!(INTERNAL, INTERNAL_SERVER_ERROR, "internal server error");
const_error!(DATABASE_ERROR, INTERNAL_SERVER_ERROR, "database error");
const_error!(STORAGE_ERROR, INTERNAL_SERVER_ERROR, "storage error");
const_error!(
    FAILED_TO_GENERATE_JOIN_CODE,
    INTERNAL_SERVER_ERROR,
    "failed to generate join code"
);

const_error!(JSON_MISSING_FIELDS, UNPROCESSABLE_ENTITY, "missing fields");
const_error!(JSON_VALIDATE_INVALID, UNPROCESSABLE_ENTITY, "invalid data");
const_error!(MULTIPART_INVALID, UNPROCESSABLE_ENTITY, "invalid form data");
const_error!(MISSING_DOCUMENT, UNPROCESSABLE_ENTITY, "missing document");

const_error!(JSON_SYNTAX_ERROR, BAD_REQUEST, "syntax error");
const_error!(JSON_CONTENT_TYPE, BAD_REQUEST, "missing or wrong content-type");
const_error!(DUPLICATE_EMAIL, BAD_REQUEST, "email is already taken");
const_error!(JOIN_CODE_NOT_FOUND, BAD_REQUEST, "join code not found");
const_error!(ALREADY_JOINED, BAD_REQUEST, "user has already joined the classroom");

const_error!(COULD_NOT_GET_CLAIMS, UNAUTHORIZED, "could not get claims");

const_error!(NOT_ENOUGH_PERMISSIONS, FORBIDDEN, "not enough permissions");
const_error!(USER_NOT_REGISTERED, FORBIDDEN, "user is not registered");
const_error!(
    NOT_CLASSROOM_OWNER,
    FORBIDDEN,
    "user must be the owner of the classroom"
);

const_error!(CLASSROOM_NOT_FOUND, NOT_FOUND, "classroom not found");
const_error!(USER_NOT_FOUND, NOT_FOUND, "user not found");
const_error!(
    USER_NOT_JOINED,
    NOT_FOUND,
    "User has not joined selected classroom"
);
const_error!(LECTURE_NOT_FOUND, NOT_FOUND, "lecture not found");
const_error!(ASSIGNABLE_NOT_FOUND, NOT_FOUND, "assignable not found");
const_error!(SUBMISSION_NOT_FOUND, NOT_FOUND, "submission not found");
const_error!(DOCUMENT_NOT_FOUND, NOT_FOUND, "document not found");
